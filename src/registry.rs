use std::time::Instant;

use crate::sample::{ClipDrawMatch, TITLE};
use crate::view::SampleView;

/// Creates a view whose animations start at the given instant.
pub type SampleFactory = fn(Instant) -> Box<dyn SampleView>;

#[derive(Clone, Copy)]
pub struct SampleEntry {
    pub name: &'static str,
    pub factory: SampleFactory,
}

/// Name-indexed list of samples a gallery host can open.
#[derive(Clone, Default)]
pub struct SampleRegistry {
    entries: Vec<SampleEntry>,
}

impl SampleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every sample in this crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(TITLE, open_clip_draw_match);
        registry
    }

    /// Registers `factory` under `name`, replacing an earlier entry of the
    /// same name.
    pub fn register(&mut self, name: &'static str, factory: SampleFactory) -> &mut Self {
        let entry = SampleEntry { name, factory };
        match self.entries.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => {
                tracing::warn!(name, "replacing registered sample");
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
        self
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&SampleEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Instantiates the sample registered under `name`.
    pub fn create(&self, name: &str, started: Instant) -> Option<Box<dyn SampleView>> {
        self.find(name).map(|entry| (entry.factory)(started))
    }
}

fn open_clip_draw_match(started: Instant) -> Box<dyn SampleView> {
    Box::new(ClipDrawMatch::new(started))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_opens_clip_draw_match() {
        let registry = SampleRegistry::builtin();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["ClipDrawMatch"]);

        let mut view = registry
            .create("ClipDrawMatch", Instant::now())
            .expect("sample is registered");
        assert_eq!(view.title(), Some("ClipDrawMatch"));
    }

    #[test]
    fn unknown_names_create_nothing() {
        let registry = SampleRegistry::builtin();
        assert!(registry.create("Nope", Instant::now()).is_none());
    }

    #[test]
    fn registering_a_name_twice_replaces_it() {
        let mut registry = SampleRegistry::new();
        registry
            .register("Sample", open_clip_draw_match)
            .register("Sample", open_clip_draw_match);
        assert_eq!(registry.len(), 1);
    }
}
