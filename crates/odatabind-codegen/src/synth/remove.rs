use super::EntityModel;
use crate::{Body, MethodDecl};

pub(super) fn remove(model: &EntityModel) -> MethodDecl {
    let class = model.names.class();

    let mut body = Body::new();
    body.line(2, "OEntityKey ODataKey = OEntityKey.parse(odc.getDecodedRemoteKey(Id));")
        .line(
            2,
            format!("odc.rooODataConsumer.deleteEntity(\"{class}\", ODataKey).execute();"),
        )
        .line(2, "localRemove();");

    MethodDecl::new("remove").annotation("@Transactional").body(body)
}

/// Removes the local row, whether or not it is attached to the current
/// persistence context.
pub(super) fn local_remove(model: &EntityModel) -> MethodDecl {
    let class = model.names.class();
    let local = model.names.local_var();

    let mut body = Body::new();
    body.line(2, "if (this.entityManager == null) this.entityManager = entityManager();")
        .line(2, "if (this.entityManager.contains(this)) {")
        .line(3, "this.entityManager.remove(this);")
        .line(2, "} else {")
        .line(3, format!("{class} {local} = entityManager().find({class}.class, Id);"))
        .line(3, format!("this.entityManager.remove({local});"))
        .line(2, "}");

    MethodDecl::new("localRemove").annotation("@Transactional").body(body)
}
