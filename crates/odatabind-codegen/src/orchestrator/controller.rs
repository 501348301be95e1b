use super::{Orchestrator, Session, Stage};
use crate::synth::{self, CONTROLLER_IMPORTS};
use crate::{ClassNames, Package, SourceStore};
use odatabind_core::Result;

use log::debug;

impl<S: SourceStore> Orchestrator<S> {
    /// Replaces the `show` handler of `<class>Controller` with one that
    /// looks entities up by their encoded key.
    pub fn adapt_controller(&mut self, class: &str) -> Result<()> {
        let controller = format!("{class}Controller");
        let path = self.layout.class_path(Package::Web, &controller);
        let mut file = self.read_class(&path)?;
        let mut session = Session::start(&controller, Stage::ClassMaterializing);

        let date_patterns = self.uses_date_patterns(&controller)?;
        debug!("`{controller}` date patterns: {date_patterns}");

        file.upsert_method(synth::controller_show(&ClassNames::new(class), date_patterns), true);
        file.add_imports(CONTROLLER_IMPORTS.iter().copied());

        session.advance(Stage::PersistenceMethodsSynthesized);

        self.write_class(Package::Web, &file, &mut session)
    }

    /// Whether the scaffolded aspects of `controller` register date format
    /// patterns.
    fn uses_date_patterns(&self, controller: &str) -> Result<bool> {
        let pattern = self
            .layout
            .glob(Package::Web, &format!("{controller}_Roo_Controller*.aj"));
        let needle = format!("{controller}.addDateTimeFormatPatterns(");

        for path in self.store.list_matching(&pattern)? {
            if self.store.read(&path)?.contains(&needle) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}
