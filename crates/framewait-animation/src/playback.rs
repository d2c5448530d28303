use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Host-owned animation state polled by [`crate::wait_while_playing`].
pub trait Playback {
    /// Whether the animation object still exists.
    fn is_alive(&self) -> bool {
        true
    }

    fn is_playing(&self) -> bool;
}

impl<P: Playback + ?Sized> Playback for &P {
    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }
}

impl<P: Playback + ?Sized> Playback for Rc<P> {
    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }
}

impl<P: Playback + ?Sized> Playback for RefCell<P> {
    fn is_alive(&self) -> bool {
        self.borrow().is_alive()
    }

    fn is_playing(&self) -> bool {
        self.borrow().is_playing()
    }
}

/// A dropped animation is dead and never playing.
impl<P: Playback + ?Sized> Playback for Weak<P> {
    fn is_alive(&self) -> bool {
        self.upgrade().is_some_and(|playback| playback.is_alive())
    }

    fn is_playing(&self) -> bool {
        self.upgrade().is_some_and(|playback| playback.is_playing())
    }
}

/// `None` stands for a missing animation reference.
impl<P: Playback> Playback for Option<P> {
    fn is_alive(&self) -> bool {
        self.as_ref().is_some_and(|playback| playback.is_alive())
    }

    fn is_playing(&self) -> bool {
        self.as_ref().is_some_and(|playback| playback.is_playing())
    }
}
