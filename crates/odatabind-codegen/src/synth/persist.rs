use super::{snippets, EntityModel};
use crate::{Anchor, Body, MethodDecl};

use std_util::str::capitalize;

const TRANSACTIONAL: &str = "@Transactional";
const ENSURE_ENTITY_MANAGER: &str =
    "if (this.entityManager == null) this.entityManager = entityManager();";

/// Creates the remote entity, adopts the key it was given and stores the
/// local row.
pub(super) fn persist(model: &EntityModel) -> MethodDecl {
    let class = model.names.class();
    let mut body = Body::new();

    body.line(2, "OEntity newEntity;")
        .blank()
        .line(
            2,
            format!("OCreateRequest<OEntity> newEntityRequest = odc.rooODataConsumer.createEntity(\"{class}\");"),
        )
        .blank();

    if model.has_date_key() {
        body.lines(2, snippets::formatters());
    }

    body.anchor(2, Anchor::Links)
        .line(2, "newEntity = newEntityRequest")
        .lines(3, model.all_fields().map(snippets::property_code))
        .anchor(3, Anchor::Properties)
        .line(3, ".execute();");

    for key in &model.keys {
        body.lines(2, snippets::show_code(key, "this", "newEntity"));
    }

    body.line(2, format!("OEntityKey ODataKey = OEntityKey.create({});", key_args(model, "")))
        .line(2, "setId(ODataKey.toKeyString());")
        .line(2, "localPersist();");

    MethodDecl::new("persist").annotation(TRANSACTIONAL).body(body)
}

pub(super) fn local_persist() -> MethodDecl {
    let mut body = Body::new();
    body.line(2, ENSURE_ENTITY_MANAGER)
        .line(2, "this.entityManager.persist(this);");

    MethodDecl::new("localPersist").annotation(TRANSACTIONAL).body(body)
}

/// Sends every non-key field to the remote entity, then merges the local row.
pub(super) fn merge(model: &EntityModel) -> MethodDecl {
    let class = model.names.class();
    let get_remote = model.names.get_remote();
    let mut body = Body::new();

    body.line(2, format!("OEntity remote{class} = {get_remote}(Id);"))
        .line(
            2,
            format!("OModifyRequest<OEntity> modifyEntityRequest = odc.rooODataConsumer.updateEntity(remote{class});"),
        )
        .anchor(2, Anchor::Links)
        .line(2, "boolean modifyRequest = modifyEntityRequest")
        .lines(3, model.fields.iter().map(snippets::property_code))
        .anchor(3, Anchor::Properties)
        .line(3, ".execute();")
        .line(2, format!("{class} localMerged = localMerge();"))
        .blank()
        .line(2, "return localMerged;");

    MethodDecl::new("merge")
        .annotation(TRANSACTIONAL)
        .returns(class)
        .body(body)
}

pub(super) fn local_merge(model: &EntityModel) -> MethodDecl {
    let class = model.names.class();
    let mut body = Body::new();

    body.line(2, ENSURE_ENTITY_MANAGER)
        .line(2, format!("{class} merged = this.entityManager.merge(this);"))
        .line(2, "this.entityManager.flush();")
        .line(2, "return merged;");

    MethodDecl::new("localMerge")
        .annotation(TRANSACTIONAL)
        .prefix("private")
        .returns(class)
        .body(body)
}

/// `"K1", <prefix>getK1(), "K2", <prefix>getK2()`
pub(super) fn key_args(model: &EntityModel, prefix: &str) -> String {
    model
        .keys
        .iter()
        .map(|key| {
            format!(
                "\"{}\", {prefix}get{}()",
                key.remote_name(),
                capitalize(key.local_name())
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
