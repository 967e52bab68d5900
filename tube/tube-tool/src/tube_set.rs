//! All live tubes of a session, keyed by name.

use hashbrown::HashMap;
use tracing::warn;

use crate::action::{ActionOutcome, TubeAction};
use crate::error::TubeResult;
use crate::selection::EditSelection;
use crate::settings::TubeSettings;
use crate::tube::Tube;

/// Prefix of generated curve object names.
pub const OBJECT_PREFIX: &str = "Obj_";

/// Owns every tube. A tube's mode lives and dies with its entry.
#[derive(Debug, Clone, Default)]
pub struct TubeSet {
    tubes: HashMap<String, Tube>,
}

impl TubeSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tubes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tubes.len()
    }

    /// Whether the set holds no tube.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tubes.is_empty()
    }

    /// Look up a tube.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tube> {
        self.tubes.get(name)
    }

    /// Look up a tube for editing its settings.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tube> {
        self.tubes.get_mut(name)
    }

    /// Tube names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tubes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// First free name of the form `Obj_<base>`, `Obj_<base>.001`, ...
    #[must_use]
    pub fn unique_name(&self, base: &str) -> String {
        let stem = format!("{OBJECT_PREFIX}{base}");
        let mut name = stem.clone();
        let mut n = 0_u32;
        while self.tubes.contains_key(&name) {
            n += 1;
            name = format!("{stem}.{n:03}");
        }
        name
    }

    /// Create a tube named after `settings.base_name`.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped [`Tube::create`]; the set is unchanged.
    pub fn create(
        &mut self,
        selection: &EditSelection,
        settings: TubeSettings,
    ) -> TubeResult<&mut Tube> {
        let settings = settings.sanitized();
        let name = self.unique_name(&settings.base_name);
        let tube = Tube::create(name.clone(), selection, settings)?;
        Ok(self.tubes.entry(name).or_insert(tube))
    }

    /// Run an action on the named tube. An unknown name is logged and
    /// skipped with `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the error of the tube's recompute or bake.
    pub fn dispatch(
        &mut self,
        name: &str,
        action: TubeAction,
        selection: &EditSelection,
    ) -> TubeResult<Option<ActionOutcome>> {
        let Some(tube) = self.tubes.get_mut(name) else {
            warn!("No tube named '{}', skipping {:?}", name, action);
            return Ok(None);
        };
        tube.dispatch(action, selection).map(Some)
    }

    /// Drop a tube and everything it owns.
    pub fn remove(&mut self, name: &str) -> Option<Tube> {
        self.tubes.remove(name)
    }
}
