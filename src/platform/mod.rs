//! Platform abstraction layer
//!
//! Frame loop scheduling and cancellation. The loop is driven by the
//! display's refresh callback on the web; native hosts drive ticks directly
//! and only use [`LoopControl`].

use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag for a frame loop
///
/// Clones observe the same flag, so an unmount/pagehide handler can stop a
/// loop it does not own. Stopping is permanent.
#[derive(Debug, Clone, Default)]
pub struct LoopControl {
    stopped: Rc<Cell<bool>>,
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        if !self.stopped.replace(true) {
            log::info!("Frame loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.get()
    }
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::LoopControl;

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// `requestAnimationFrame` loop that can be cancelled
    ///
    /// The callback reschedules itself each frame until stopped. Stopping
    /// cancels the pending frame; dropping the loop also frees the closure.
    /// Do not drop the loop from inside its own frame callback.
    pub struct AnimationLoop {
        control: LoopControl,
        callback: FrameCallback,
        pending: Rc<Cell<Option<i32>>>,
    }

    impl AnimationLoop {
        pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Self {
            let control = LoopControl::new();
            let callback: FrameCallback = Rc::new(RefCell::new(None));
            let pending = Rc::new(Cell::new(None));

            // Weak self-reference so the closure does not keep itself alive
            let weak = Rc::downgrade(&callback);
            let running = control.clone();
            let next = pending.clone();
            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
                next.set(None);
                if !running.is_running() {
                    return;
                }
                on_frame(time);
                if !running.is_running() {
                    return;
                }
                if let Some(cb) = weak.upgrade() {
                    next.set(schedule(&cb));
                }
            }) as Box<dyn FnMut(f64)>));

            pending.set(schedule(&callback));
            log::info!("Frame loop started");

            Self {
                control,
                callback,
                pending,
            }
        }

        /// A handle that can stop this loop from elsewhere
        pub fn control(&self) -> LoopControl {
            self.control.clone()
        }

        pub fn stop(&self) {
            self.control.stop();
            if let Some(id) = self.pending.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
    }

    impl Drop for AnimationLoop {
        fn drop(&mut self) {
            self.stop();
            self.callback.borrow_mut().take();
        }
    }

    fn schedule(callback: &RefCell<Option<Closure<dyn FnMut(f64)>>>) -> Option<i32> {
        let window = web_sys::window()?;
        let slot = callback.borrow();
        let closure = slot.as_ref()?;
        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_is_shared_and_permanent() {
        let control = LoopControl::new();
        let handle = control.clone();
        assert!(control.is_running());

        handle.stop();
        assert!(!control.is_running());
        handle.stop();
        assert!(!handle.is_running());
    }

    #[test]
    fn test_independent_loops() {
        let a = LoopControl::new();
        let b = LoopControl::new();
        a.stop();
        assert!(b.is_running());
    }
}
