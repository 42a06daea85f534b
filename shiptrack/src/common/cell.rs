use std::sync::Arc;

use parking_lot::RwLock;

/// A shareable read-write cell.
///
/// Cloning an `Atomic<T>` yields another handle to the same value; readers and
/// writers synchronize through a `parking_lot::RwLock`.
pub type Atomic<T> = Arc<RwLock<T>>;

#[inline]
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}

pub trait ReadExecutor<T: ?Sized> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R;
}

impl<T> ReadExecutor<T> for Atomic<T> {
    #[inline]
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let read_guard = self.read();
        f(&*read_guard)
    }
}

pub trait WriteExecutor<T: ?Sized> {
    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T> WriteExecutor<T> for Atomic<T> {
    #[inline]
    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut write_guard = self.write();
        f(&mut *write_guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic() {
        let cell = atomic(5);
        assert_eq!(*cell.read(), 5);
    }

    #[test]
    fn test_read_with() {
        let cell = atomic("pending".to_string());
        let len = cell.read_with(|value| value.len());
        assert_eq!(len, 7);
    }

    #[test]
    fn test_write_with() {
        let cell = atomic(5);
        cell.write_with(|value| *value = 10);
        assert_eq!(*cell.read(), 10);
    }

    #[test]
    fn test_clone_shares_state() {
        let cell = atomic(1);
        let other = cell.clone();
        other.write_with(|value| *value += 1);
        assert_eq!(*cell.read(), 2);
    }
}
