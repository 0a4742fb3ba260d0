use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalog::THEME_COLORS;
use crate::models::{Class, ClassTemplate, Memo, Subject, Unit};
use crate::storage::{Storage, StorageError};

const SUBJECTS_KEY: &str = "subjects";
const UNITS_KEY: &str = "units";
const CLASS_TEMPLATES_KEY: &str = "classTemplates";
const CLASSES_KEY: &str = "classes";
const MEMOS_KEY: &str = "memos";

/// Outcome of a mutating call.
///
/// Ordinary misuse (empty name, non-positive period count, unknown id) is
/// a silent `Rejected` no-op, never an error; `Err` is reserved for the
/// storage substrate failing to persist an applied change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    Rejected,
}

impl Mutation {
    pub fn is_applied(self) -> bool {
        self == Mutation::Applied
    }
}

/// The planner state: five entity collections with cascade rules on
/// delete, persisted per collection after every mutation.
///
/// Collections keep insertion order, which is the default render order.
/// The store is constructed explicitly and owned by the composition root;
/// one instance per session.
pub struct PlannerStore<S: Storage> {
    storage: S,
    subjects: Vec<Subject>,
    units: Vec<Unit>,
    class_templates: Vec<ClassTemplate>,
    classes: Vec<Class>,
    memos: Vec<Memo>,
}

/// Read one collection. A missing or unparsable value degrades to empty;
/// opening the store never fails because of stored content.
fn load_collection<S: Storage, T: DeserializeOwned>(storage: &S, key: &str) -> Vec<T> {
    match storage.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
        Ok(None) | Err(_) => Vec::new(),
    }
}

fn persist<S: Storage, T: Serialize>(
    storage: &mut S,
    key: &str,
    items: &[T],
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(items)?;
    storage.set(key, &raw)
}

impl<S: Storage> PlannerStore<S> {
    /// Load the five collections from storage, then write them back so
    /// every key exists at rest (including the never-populated `classes`
    /// scaffolding).
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let mut store = Self {
            subjects: load_collection(&storage, SUBJECTS_KEY),
            units: load_collection(&storage, UNITS_KEY),
            class_templates: load_collection(&storage, CLASS_TEMPLATES_KEY),
            classes: load_collection(&storage, CLASSES_KEY),
            memos: load_collection(&storage, MEMOS_KEY),
            storage,
        };
        store.persist_all()?;
        Ok(store)
    }

    fn persist_all(&mut self) -> Result<(), StorageError> {
        persist(&mut self.storage, SUBJECTS_KEY, &self.subjects)?;
        persist(&mut self.storage, UNITS_KEY, &self.units)?;
        persist(&mut self.storage, CLASS_TEMPLATES_KEY, &self.class_templates)?;
        persist(&mut self.storage, CLASSES_KEY, &self.classes)?;
        persist(&mut self.storage, MEMOS_KEY, &self.memos)?;
        Ok(())
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn class_templates(&self) -> &[ClassTemplate] {
        &self.class_templates
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    /// Create a subject, assigning the next palette color in creation
    /// order: the Nth subject gets `THEME_COLORS[N mod len]`.
    pub fn add_subject(&mut self, name: &str) -> Result<Mutation, StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Mutation::Rejected);
        }
        let color = THEME_COLORS[self.subjects.len() % THEME_COLORS.len()].name;
        self.subjects
            .push(Subject::new(name.to_string(), color.to_string()));
        persist(&mut self.storage, SUBJECTS_KEY, &self.subjects)?;
        Ok(Mutation::Applied)
    }

    /// Rename a subject. Color is immutable after creation.
    pub fn update_subject(&mut self, id: &str, name: &str) -> Result<Mutation, StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Mutation::Rejected);
        }
        let Some(subject) = self.subjects.iter_mut().find(|s| s.id == id) else {
            return Ok(Mutation::Rejected);
        };
        subject.name = name.to_string();
        persist(&mut self.storage, SUBJECTS_KEY, &self.subjects)?;
        Ok(Mutation::Applied)
    }

    /// Delete a subject. Cascades: removes its units and every class
    /// template that referenced it.
    pub fn delete_subject(&mut self, id: &str) -> Result<Mutation, StorageError> {
        if !self.subjects.iter().any(|s| s.id == id) {
            return Ok(Mutation::Rejected);
        }
        self.subjects.retain(|s| s.id != id);
        self.units.retain(|u| u.subject_id != id);
        self.class_templates.retain(|t| t.subject_id != id);
        persist(&mut self.storage, SUBJECTS_KEY, &self.subjects)?;
        persist(&mut self.storage, UNITS_KEY, &self.units)?;
        persist(&mut self.storage, CLASS_TEMPLATES_KEY, &self.class_templates)?;
        Ok(Mutation::Applied)
    }

    /// Create a unit under a subject. The subject id is not checked for
    /// existence; that is the caller's responsibility.
    pub fn add_unit(
        &mut self,
        subject_id: &str,
        name: &str,
        required_periods: u32,
    ) -> Result<Mutation, StorageError> {
        let name = name.trim();
        if name.is_empty() || required_periods == 0 {
            return Ok(Mutation::Rejected);
        }
        self.units.push(Unit::new(
            subject_id.to_string(),
            name.to_string(),
            required_periods,
        ));
        persist(&mut self.storage, UNITS_KEY, &self.units)?;
        Ok(Mutation::Applied)
    }

    /// Update a unit's name and required-period count. The owning subject
    /// is fixed at creation and cannot be reassigned.
    pub fn update_unit(
        &mut self,
        id: &str,
        name: &str,
        required_periods: u32,
    ) -> Result<Mutation, StorageError> {
        let name = name.trim();
        if name.is_empty() || required_periods == 0 {
            return Ok(Mutation::Rejected);
        }
        let Some(unit) = self.units.iter_mut().find(|u| u.id == id) else {
            return Ok(Mutation::Rejected);
        };
        unit.name = name.to_string();
        unit.required_periods = required_periods;
        persist(&mut self.storage, UNITS_KEY, &self.units)?;
        Ok(Mutation::Applied)
    }

    /// Delete a unit. Cascades: class templates that referenced it are
    /// kept, with their unit reference cleared.
    pub fn delete_unit(&mut self, id: &str) -> Result<Mutation, StorageError> {
        if !self.units.iter().any(|u| u.id == id) {
            return Ok(Mutation::Rejected);
        }
        self.units.retain(|u| u.id != id);
        for template in &mut self.class_templates {
            if template.unit_id.as_deref() == Some(id) {
                template.unit_id = None;
            }
        }
        persist(&mut self.storage, UNITS_KEY, &self.units)?;
        persist(&mut self.storage, CLASS_TEMPLATES_KEY, &self.class_templates)?;
        Ok(Mutation::Applied)
    }

    /// Upsert the class template for a `(day, period)` slot. An occupied
    /// slot is overwritten in place, keeping the template's id and
    /// position. Day, period and referenced ids are not validated here.
    pub fn set_class_template(
        &mut self,
        day: &str,
        period_id: u32,
        subject_id: &str,
        unit_id: Option<&str>,
    ) -> Result<Mutation, StorageError> {
        if let Some(existing) = self
            .class_templates
            .iter_mut()
            .find(|t| t.day == day && t.period_id == period_id)
        {
            existing.subject_id = subject_id.to_string();
            existing.unit_id = unit_id.map(str::to_string);
        } else {
            self.class_templates.push(ClassTemplate::new(
                day.to_string(),
                period_id,
                subject_id.to_string(),
                unit_id.map(str::to_string),
            ));
        }
        persist(&mut self.storage, CLASS_TEMPLATES_KEY, &self.class_templates)?;
        Ok(Mutation::Applied)
    }

    /// Remove the class template for a `(day, period)` slot, if any.
    pub fn delete_class_template(
        &mut self,
        day: &str,
        period_id: u32,
    ) -> Result<Mutation, StorageError> {
        let before = self.class_templates.len();
        self.class_templates
            .retain(|t| !(t.day == day && t.period_id == period_id));
        if self.class_templates.len() == before {
            return Ok(Mutation::Rejected);
        }
        persist(&mut self.storage, CLASS_TEMPLATES_KEY, &self.class_templates)?;
        Ok(Mutation::Applied)
    }

    /// Upsert the memo for a weekday. Content is stored verbatim; an
    /// empty memo is valid.
    pub fn update_memo(&mut self, day: &str, content: &str) -> Result<Mutation, StorageError> {
        if let Some(existing) = self.memos.iter_mut().find(|m| m.day == day) {
            existing.content = content.to_string();
        } else {
            self.memos
                .push(Memo::new(day.to_string(), content.to_string()));
        }
        persist(&mut self.storage, MEMOS_KEY, &self.memos)?;
        Ok(Mutation::Applied)
    }

    pub fn class_template(&self, day: &str, period_id: u32) -> Option<&ClassTemplate> {
        self.class_templates
            .iter()
            .find(|t| t.day == day && t.period_id == period_id)
    }

    pub fn subject_by_id(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn unit_by_id(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn units_by_subject_id(&self, subject_id: &str) -> Vec<&Unit> {
        self.units
            .iter()
            .filter(|u| u.subject_id == subject_id)
            .collect()
    }

    pub fn memo_for_day(&self, day: &str) -> Option<&Memo> {
        self.memos.iter().find(|m| m.day == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn open_store() -> PlannerStore<MemoryStorage> {
        PlannerStore::open(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn subject_colors_cycle_through_palette() {
        let mut store = open_store();
        for name in ["Math", "Art", "Science", "Music"] {
            assert!(store.add_subject(name).unwrap().is_applied());
        }
        let colors: Vec<&str> = store.subjects().iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, vec!["primary", "secondary", "danger", "primary"]);
    }

    #[test]
    fn blank_or_whitespace_names_are_rejected() {
        let mut store = open_store();
        assert_eq!(store.add_subject("").unwrap(), Mutation::Rejected);
        assert_eq!(store.add_subject("   ").unwrap(), Mutation::Rejected);
        assert!(store.subjects().is_empty());

        store.add_subject("Math").unwrap();
        let id = store.subjects()[0].id.clone();
        assert_eq!(store.update_subject(&id, " ").unwrap(), Mutation::Rejected);
        assert_eq!(store.subjects()[0].name, "Math");
    }

    #[test]
    fn names_are_stored_trimmed() {
        let mut store = open_store();
        store.add_subject("  Math  ").unwrap();
        assert_eq!(store.subjects()[0].name, "Math");
    }

    #[test]
    fn unknown_ids_are_silent_no_ops() {
        let mut store = open_store();
        assert_eq!(store.update_subject("nope", "X").unwrap(), Mutation::Rejected);
        assert_eq!(store.delete_subject("nope").unwrap(), Mutation::Rejected);
        assert_eq!(store.update_unit("nope", "X", 1).unwrap(), Mutation::Rejected);
        assert_eq!(store.delete_unit("nope").unwrap(), Mutation::Rejected);
        assert_eq!(
            store.delete_class_template("Monday", 1).unwrap(),
            Mutation::Rejected
        );
    }

    #[test]
    fn unit_requires_positive_period_count() {
        let mut store = open_store();
        store.add_subject("Math").unwrap();
        let sid = store.subjects()[0].id.clone();
        assert_eq!(store.add_unit(&sid, "Algebra", 0).unwrap(), Mutation::Rejected);
        assert!(store.units().is_empty());
    }

    #[test]
    fn deleting_subject_cascades_to_units_and_templates() {
        let mut store = open_store();
        store.add_subject("Math").unwrap();
        store.add_subject("Art").unwrap();
        let math = store.subjects()[0].id.clone();
        let art = store.subjects()[1].id.clone();

        store.add_unit(&math, "Algebra", 3).unwrap();
        store.add_unit(&art, "Color theory", 2).unwrap();
        let algebra = store.units()[0].id.clone();
        store
            .set_class_template("Monday", 1, &math, Some(&algebra))
            .unwrap();
        store.set_class_template("Tuesday", 2, &art, None).unwrap();

        store.delete_subject(&math).unwrap();

        assert!(store.units().iter().all(|u| u.subject_id != math));
        assert!(store.class_templates().iter().all(|t| t.subject_id != math));
        assert_eq!(store.subjects().len(), 1);
        assert_eq!(store.units().len(), 1);
        assert_eq!(store.class_templates().len(), 1);
    }

    #[test]
    fn deleting_unit_clears_template_reference_but_keeps_template() {
        let mut store = open_store();
        store.add_subject("Math").unwrap();
        let math = store.subjects()[0].id.clone();
        store.add_unit(&math, "Algebra", 3).unwrap();
        let algebra = store.units()[0].id.clone();
        store
            .set_class_template("Monday", 1, &math, Some(&algebra))
            .unwrap();

        store.delete_unit(&algebra).unwrap();

        assert!(store.units().is_empty());
        let template = store.class_template("Monday", 1).unwrap();
        assert_eq!(template.subject_id, math);
        assert_eq!(template.unit_id, None);
    }

    #[test]
    fn setting_occupied_slot_overwrites_in_place() {
        let mut store = open_store();
        store.add_subject("Math").unwrap();
        store.add_subject("Art").unwrap();
        let math = store.subjects()[0].id.clone();
        let art = store.subjects()[1].id.clone();

        store.set_class_template("Monday", 1, &math, None).unwrap();
        let first_id = store.class_template("Monday", 1).unwrap().id.clone();

        store.set_class_template("Monday", 1, &art, None).unwrap();

        let slots: Vec<_> = store
            .class_templates()
            .iter()
            .filter(|t| t.day == "Monday" && t.period_id == 1)
            .collect();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].subject_id, art);
        assert_eq!(slots[0].id, first_id);
    }

    #[test]
    fn memo_upsert_keeps_one_record_per_day() {
        let mut store = open_store();
        store.update_memo("Monday", "a").unwrap();
        let first_id = store.memo_for_day("Monday").unwrap().id.clone();
        store.update_memo("Monday", "b").unwrap();

        let monday: Vec<_> = store.memos().iter().filter(|m| m.day == "Monday").collect();
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].content, "b");
        assert_eq!(monday[0].id, first_id);

        // Empty content is valid and distinct from "no memo".
        store.update_memo("Monday", "").unwrap();
        assert_eq!(store.memo_for_day("Monday").unwrap().content, "");
    }

    #[test]
    fn rejected_mutations_do_not_touch_storage() {
        let storage = MemoryStorage::new();
        let mut store = PlannerStore::open(storage.clone()).unwrap();
        let persisted_empty = storage.get(SUBJECTS_KEY).unwrap();

        store.add_subject("  ").unwrap();
        assert_eq!(storage.get(SUBJECTS_KEY).unwrap(), persisted_empty);

        store.add_subject("Math").unwrap();
        let after_add = storage.get(SUBJECTS_KEY).unwrap();
        assert_ne!(after_add, persisted_empty);
        store.update_subject("missing", "X").unwrap();
        assert_eq!(storage.get(SUBJECTS_KEY).unwrap(), after_add);
    }

    #[test]
    fn open_writes_every_collection_key() {
        let storage = MemoryStorage::new();
        let _store = PlannerStore::open(storage.clone()).unwrap();
        for key in [
            SUBJECTS_KEY,
            UNITS_KEY,
            CLASS_TEMPLATES_KEY,
            CLASSES_KEY,
            MEMOS_KEY,
        ] {
            assert_eq!(storage.get(key).unwrap().as_deref(), Some("[]"));
        }
    }

    #[test]
    fn malformed_stored_collection_degrades_to_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(SUBJECTS_KEY, "not json").unwrap();
        storage
            .set(MEMOS_KEY, r#"[{"id":"m1","day":"Friday","content":"quiz"}]"#)
            .unwrap();

        let store = PlannerStore::open(storage).unwrap();
        assert!(store.subjects().is_empty());
        // Other collections are unaffected by one bad blob.
        assert_eq!(store.memos().len(), 1);
        assert_eq!(store.memo_for_day("Friday").unwrap().content, "quiz");
    }

    #[test]
    fn planner_scenario_end_to_end() {
        let mut store = open_store();

        store.add_subject("Math").unwrap();
        assert_eq!(store.subjects()[0].color, "primary");
        store.add_subject("Art").unwrap();
        assert_eq!(store.subjects()[1].color, "secondary");
        let math = store.subjects()[0].id.clone();

        store.add_unit(&math, "Algebra", 3).unwrap();
        assert_eq!(store.units()[0].required_periods, 3);
        let algebra = store.units()[0].id.clone();

        store
            .set_class_template("Monday", 1, &math, Some(&algebra))
            .unwrap();
        let template = store.class_template("Monday", 1).unwrap();
        assert_eq!(template.subject_id, math);
        assert_eq!(template.unit_id.as_deref(), Some(algebra.as_str()));

        store.delete_subject(&math).unwrap();
        assert_eq!(store.subjects().len(), 1);
        assert_eq!(store.subjects()[0].name, "Art");
        assert!(store.units().is_empty());
        assert!(store.class_templates().is_empty());
    }

    #[test]
    fn reload_reproduces_collections_in_order() {
        let storage = MemoryStorage::new();
        let mut store = PlannerStore::open(storage.clone()).unwrap();
        store.add_subject("Math").unwrap();
        store.add_subject("Art").unwrap();
        let math = store.subjects()[0].id.clone();
        store.add_unit(&math, "Algebra", 3).unwrap();
        store.set_class_template("Monday", 1, &math, None).unwrap();
        store.update_memo("Friday", "bring handouts").unwrap();

        let reloaded = PlannerStore::open(storage).unwrap();
        assert_eq!(reloaded.subjects(), store.subjects());
        assert_eq!(reloaded.units(), store.units());
        assert_eq!(reloaded.class_templates(), store.class_templates());
        assert_eq!(reloaded.classes(), store.classes());
        assert_eq!(reloaded.memos(), store.memos());
    }
}
