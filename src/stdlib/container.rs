//! `container/heap`, `container/list`, `container/ring`.

use crate::builder::PackageBuilder;
use crate::error::Result;
use crate::package::Package;
use crate::registry::Registry;
use crate::types::RecvKind::Pointer;
use crate::types::Ty;

pub(crate) fn register(registry: &mut Registry) {
    registry.register("container/heap", heap);
    registry.register("container/list", list);
    registry.register("container/ring", ring);
}

pub fn heap() -> Result<Package> {
    let mut b = PackageBuilder::new("container/heap", "heap");
    let any = b.any();
    b.func("Init", &[("h", any)], &[])?;
    b.func("Push", &[("h", any), ("x", any)], &[])?;
    b.func("Pop", &[("h", any)], &[any])?;
    b.func("Fix", &[("h", any), ("i", Ty::INT)], &[])?;
    b.func("Remove", &[("h", any), ("i", Ty::INT)], &[any])?;
    b.finish()
}

pub fn list() -> Result<Package> {
    let mut b = PackageBuilder::new("container/list", "list");
    let any = b.any();

    let shape = b.struct_type(&[("Value", any)]);
    let element = b.named("Element", shape)?;
    let element_ptr = b.recv_ptr(element);
    let shape = b.struct_type(&[("len", Ty::INT)]);
    let list = b.named("List", shape)?;
    let list_ptr = b.recv_ptr(list);
    b.func("New", &[], &[list_ptr])?;

    b.method(list, Pointer, "PushBack", &[("v", any)], &[element_ptr])?;
    b.method(list, Pointer, "PushFront", &[("v", any)], &[element_ptr])?;
    b.method(list, Pointer, "Len", &[], &[Ty::INT])?;
    b.method(list, Pointer, "Front", &[], &[element_ptr])?;
    b.method(list, Pointer, "Remove", &[("e", element_ptr)], &[any])?;
    b.method(element, Pointer, "Next", &[], &[element_ptr])?;
    b.method(element, Pointer, "Prev", &[], &[element_ptr])?;
    b.method(list, Pointer, "Back", &[], &[element_ptr])?;
    b.method(list, Pointer, "Init", &[], &[list_ptr])?;
    for name in ["InsertBefore", "InsertAfter"] {
        b.method(list, Pointer, name, &[("v", any), ("mark", element_ptr)], &[element_ptr])?;
    }
    for name in ["MoveToFront", "MoveToBack"] {
        b.method(list, Pointer, name, &[("e", element_ptr)], &[])?;
    }
    for name in ["MoveBefore", "MoveAfter"] {
        b.method(list, Pointer, name, &[("e", element_ptr), ("mark", element_ptr)], &[])?;
    }
    for name in ["PushBackList", "PushFrontList"] {
        b.method(list, Pointer, name, &[("other", list_ptr)], &[])?;
    }
    b.finish()
}

pub fn ring() -> Result<Package> {
    let mut b = PackageBuilder::new("container/ring", "ring");
    let any = b.any();

    let shape = b.struct_type(&[("Value", any)]);
    let ring = b.named("Ring", shape)?;
    let ring_ptr = b.recv_ptr(ring);
    b.func("New", &[("n", Ty::INT)], &[ring_ptr])?;
    b.method(ring, Pointer, "Len", &[], &[Ty::INT])?;
    b.method(ring, Pointer, "Next", &[], &[ring_ptr])?;
    b.method(ring, Pointer, "Prev", &[], &[ring_ptr])?;
    b.method(ring, Pointer, "Move", &[("n", Ty::INT)], &[ring_ptr])?;
    b.method(ring, Pointer, "Link", &[("s", ring_ptr)], &[ring_ptr])?;
    b.method(ring, Pointer, "Unlink", &[("n", Ty::INT)], &[ring_ptr])?;
    let visit = b.sig(&[("", any)], &[]);
    b.method(ring, Pointer, "Do", &[("f", visit)], &[])?;
    b.finish()
}
