use std::mem;

use crate::error::{Result, ToolkitError};
use crate::object::Object;
use crate::toolkit::{with_toolkit, NodeHandle, ObjectClass, Toolkit};

/// Owner of exactly one native toolkit object.
///
/// The handle is allocated on construction and deleted through the toolkit
/// when the `ViewBase` is dropped. `parent` is a lookup-only back reference
/// to the native parent; it never keeps anything alive.
#[derive(Debug)]
pub struct ViewBase {
    object: Object,
    handle: Option<NodeHandle>,
    parent: Option<NodeHandle>,
}

impl ViewBase {
    /// Allocate a `class` object under `parent`, or under the active screen.
    ///
    /// The new view is not added to any container's children; that is the
    /// container's job.
    pub fn try_new(class: ObjectClass, parent: Option<NodeHandle>) -> Result<Self> {
        let handle = with_toolkit(|tk| {
            let native_parent = parent.unwrap_or_else(|| tk.active_screen());
            tk.create(class, native_parent)
        })??;
        log::debug!("Allocated {:?} object {}", class, handle);

        Ok(Self {
            object: Object::new(),
            handle: Some(handle),
            parent,
        })
    }

    /// Like [`try_new`](Self::try_new), but panics if the toolkit cannot
    /// allocate the object. A view without a native handle is unusable.
    pub fn new(class: ObjectClass, parent: Option<NodeHandle>) -> Self {
        match Self::try_new(class, parent) {
            Ok(base) => base,
            Err(err) => panic!("failed to allocate {class:?} view: {err}"),
        }
    }

    /// The owned native handle; `None` once released or taken.
    pub fn handle(&self) -> Option<NodeHandle> {
        self.handle
    }

    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    pub fn is_released(&self) -> bool {
        self.handle.is_none()
    }

    /// Move the native object under `parent` and remember it as the parent.
    pub fn reparent(&mut self, parent: NodeHandle) -> bool {
        let moved = self.apply("set_parent", |tk, handle| tk.set_parent(handle, parent));
        if moved {
            self.parent = Some(parent);
        }
        moved
    }

    /// Transfer ownership of the native handle into a new `ViewBase`.
    ///
    /// `self` is left released: dropping it afterwards deletes nothing.
    pub fn take(&mut self) -> ViewBase {
        ViewBase {
            object: mem::take(&mut self.object),
            handle: self.handle.take(),
            parent: self.parent,
        }
    }

    /// Delete the native object. Safe to call any number of times.
    pub fn release(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        match with_toolkit(|tk| tk.delete(handle)) {
            Ok(Ok(())) => log::debug!("Released object {}", handle),
            // Freed together with its native parent
            Ok(Err(ToolkitError::StaleHandle(_))) => {
                log::debug!("Object {} was already deleted", handle)
            }
            Ok(Err(err)) => log::warn!("Failed to release object {}: {}", handle, err),
            Err(err) => log::warn!("Leaking object {}: {}", handle, err),
        }
    }

    /// Run a mutating toolkit call against the owned handle.
    ///
    /// Failures are logged and reported as `false`; setters on a live view
    /// never surface errors to the caller.
    pub fn apply(
        &self,
        what: &str,
        f: impl FnOnce(&mut dyn Toolkit, NodeHandle) -> Result<(), ToolkitError>,
    ) -> bool {
        let Some(handle) = self.handle else {
            log::warn!("{} on a released view ignored", what);
            return false;
        };
        match with_toolkit(|tk| f(tk, handle)) {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                log::warn!("{} on {} failed: {}", what, handle, err);
                false
            }
            Err(err) => {
                log::warn!("{} on {} failed: {}", what, handle, err);
                false
            }
        }
    }

    /// Read something back from the toolkit for the owned handle.
    pub fn query<R>(&self, f: impl FnOnce(&dyn Toolkit, NodeHandle) -> Option<R>) -> Option<R> {
        let handle = self.handle?;
        match with_toolkit(|tk| f(&*tk, handle)) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("query on {} failed: {}", handle, err);
                None
            }
        }
    }
}

impl Drop for ViewBase {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DuiError;
    use crate::layout::Length;
    use crate::toolkit::{self, HeadlessProbe, HeadlessToolkit};

    fn install_headless() -> HeadlessProbe {
        let tk = HeadlessToolkit::default();
        let probe = tk.probe();
        toolkit::install(tk);
        probe
    }

    fn screen() -> NodeHandle {
        with_toolkit(|tk| tk.active_screen()).unwrap()
    }

    #[test]
    fn test_new_allocates_one_object() {
        let probe = install_headless();
        let base = ViewBase::new(ObjectClass::Object, None);

        let handle = base.handle().unwrap();
        assert_eq!(probe.live_objects(), 1);
        assert_eq!(base.parent(), None);
        assert_eq!(with_toolkit(|tk| tk.parent(handle)).unwrap(), Some(screen()));
    }

    #[test]
    fn test_new_under_parent_records_back_reference() {
        let _probe = install_headless();
        let outer = ViewBase::new(ObjectClass::Object, None);
        let outer_handle = outer.handle().unwrap();
        let inner = ViewBase::new(ObjectClass::Label, Some(outer_handle));

        assert_eq!(inner.parent(), Some(outer_handle));
        assert_eq!(
            with_toolkit(|tk| tk.parent(inner.handle().unwrap())).unwrap(),
            Some(outer_handle)
        );
    }

    #[test]
    fn test_release_is_idempotent() {
        let probe = install_headless();
        let mut base = ViewBase::new(ObjectClass::Object, None);

        base.release();
        base.release();
        assert!(base.is_released());
        drop(base);

        assert_eq!(probe.delete_calls(), 1);
        assert_eq!(probe.live_objects(), 0);
    }

    #[test]
    fn test_take_transfers_ownership() {
        let probe = install_headless();
        let mut source = ViewBase::new(ObjectClass::Label, None);
        source.object_mut().set_object_name("greeting");
        let before = source.handle();

        let target = source.take();
        assert_eq!(source.handle(), None);
        assert_eq!(target.handle(), before);
        assert_eq!(target.object().object_name(), Some("greeting"));

        drop(source);
        assert_eq!(probe.delete_calls(), 0);
        drop(target);
        assert_eq!(probe.delete_calls(), 1);
        assert_eq!(probe.live_objects(), 0);
    }

    #[test]
    fn test_try_new_without_toolkit() {
        let result = ViewBase::try_new(ObjectClass::Object, None);
        assert!(matches!(result, Err(DuiError::NoToolkit)));
    }

    #[test]
    #[should_panic(expected = "failed to allocate")]
    fn test_new_fails_fast_without_toolkit() {
        let _ = ViewBase::new(ObjectClass::Object, None);
    }

    #[test]
    fn test_try_new_out_of_memory() {
        toolkit::install(HeadlessToolkit::default().with_object_limit(0));
        let result = ViewBase::try_new(ObjectClass::Button, None);
        assert!(matches!(
            result,
            Err(DuiError::Toolkit(ToolkitError::OutOfMemory(ObjectClass::Button)))
        ));
    }

    #[test]
    fn test_release_after_uninstall_does_not_panic() {
        let probe = install_headless();
        let base = ViewBase::new(ObjectClass::Object, None);
        let _toolkit = toolkit::uninstall();
        drop(base);
        assert_eq!(probe.delete_calls(), 0);
    }

    #[test]
    fn test_release_of_natively_deleted_child() {
        let probe = install_headless();
        let mut outer = ViewBase::new(ObjectClass::Object, None);
        let inner = ViewBase::new(ObjectClass::Label, outer.handle());

        outer.release();
        assert_eq!(probe.live_objects(), 0);
        drop(inner);
        assert_eq!(probe.deleted(), 2);
        assert_eq!(probe.delete_calls(), 2);
    }

    #[test]
    fn test_apply_on_released_view() {
        let _probe = install_headless();
        let mut base = ViewBase::new(ObjectClass::Object, None);
        base.release();
        assert!(!base.apply("set_width", |tk, h| tk.set_width(h, Length::Px(10))));
        assert_eq!(base.query(|tk, h| tk.width(h)), None);
    }
}
