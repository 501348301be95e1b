use log::debug;
use std::fmt;

/// Progress of one synthesis session. Sessions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    SchemaLoaded,
    ClassMaterializing,
    FieldsSynthesized,
    RelationshipsWoven,
    PersistenceMethodsSynthesized,
    Serialized,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::SchemaLoaded => "schema loaded",
            Stage::ClassMaterializing => "class materializing",
            Stage::FieldsSynthesized => "fields synthesized",
            Stage::RelationshipsWoven => "relationships woven",
            Stage::PersistenceMethodsSynthesized => "persistence methods synthesized",
            Stage::Serialized => "serialized",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the stage of the class currently being synthesized.
#[derive(Debug)]
pub(super) struct Session {
    class: String,
    stage: Stage,
}

impl Session {
    pub(super) fn start(class: impl Into<String>, stage: Stage) -> Session {
        let class = class.into();
        debug!("`{class}`: {stage}");
        Session { class, stage }
    }

    pub(super) fn advance(&mut self, next: Stage) {
        debug_assert!(
            next > self.stage,
            "`{}` cannot move from `{}` back to `{next}`",
            self.class,
            self.stage
        );

        debug!("`{}`: {} -> {next}", self.class, self.stage);
        self.stage = next;
    }

    pub(super) fn stage(&self) -> Stage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::SchemaLoaded < Stage::ClassMaterializing);
        assert!(Stage::RelationshipsWoven < Stage::PersistenceMethodsSynthesized);
        assert!(Stage::PersistenceMethodsSynthesized < Stage::Serialized);
    }

    #[test]
    fn augmentation_may_skip_stages() {
        let mut session = Session::start("Products", Stage::ClassMaterializing);
        session.advance(Stage::FieldsSynthesized);
        session.advance(Stage::Serialized);
        assert_eq!(session.stage(), Stage::Serialized);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot move from")]
    fn going_back_panics() {
        let mut session = Session::start("Products", Stage::FieldsSynthesized);
        session.advance(Stage::SchemaLoaded);
    }
}
