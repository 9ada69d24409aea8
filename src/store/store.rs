//! Record store
//!
//! Validates payloads, delegates to a [`SearchTree`], and reports every
//! mutation through the logger and the metrics registry. Mutations need
//! `&mut self`; lookups, listings and reports only need `&self`.

use std::fmt;

use serde::Serialize;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry, MetricsSnapshot};
use crate::schema::{
    ChildRecord, ChildUpdate, DocumentId, NewChild, RecordValidator, ValidationRules,
};
use crate::tree::{BalancedTree, OrderedTree, SearchTree, TraversalOrder, TreeInfo, TreeKind};

use super::errors::{StoreError, StoreResult};
use super::report::{self, CityGenderReport};

/// Store backed by the plain BST
pub type OrderedStore = RecordStore<OrderedTree<ChildRecord>>;

/// Store backed by the AVL tree
pub type BalancedStore = RecordStore<BalancedTree<ChildRecord>>;

/// A traversal of the whole store
#[derive(Debug, Serialize)]
pub struct Listing<'a> {
    pub total: usize,
    pub order: TraversalOrder,
    pub children: Vec<&'a ChildRecord>,
}

/// Child records keyed by document, held in one tree
pub struct RecordStore<T> {
    tree: T,
    kind: TreeKind,
    validator: RecordValidator,
    metrics: MetricsRegistry,
}

impl OrderedStore {
    /// Empty BST-backed store with the BST rules
    pub fn ordered() -> Self {
        Self::new(OrderedTree::new())
    }
}

impl BalancedStore {
    /// Empty AVL-backed store with the AVL rules
    pub fn balanced() -> Self {
        Self::new(BalancedTree::new())
    }
}

impl<T: SearchTree<ChildRecord>> RecordStore<T> {
    /// Wraps `tree` using the validation rules of its variant
    pub fn new(tree: T) -> Self {
        let rules = ValidationRules::for_kind(tree.kind());
        Self::with_rules(tree, rules)
    }

    /// Wraps `tree` with explicit validation rules
    pub fn with_rules(tree: T, rules: ValidationRules) -> Self {
        let metrics = MetricsRegistry::new();
        metrics.set_records(tree.count() as u64);
        Self {
            kind: tree.kind(),
            tree,
            validator: RecordValidator::new(rules),
            metrics,
        }
    }

    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    /// Validate and insert a new record.
    ///
    /// # Errors
    ///
    /// `Validation` for a bad payload, `Duplicate` when the document is
    /// already stored. The store is unchanged in both cases.
    pub fn create(&mut self, child: NewChild) -> StoreResult<ChildRecord> {
        let record = match self.validator.validate_new(child) {
            Ok(record) => record,
            Err(err) => return Err(self.reject("create", None, err.into())),
        };
        let document = record.document;

        if let Err(err) = self.tree.insert(document, record.clone()) {
            return Err(self.reject("create", Some(document), err.into()));
        }

        self.metrics.record_created();
        self.log_mutation(Event::RecordCreated, document);
        Ok(record)
    }

    /// Record stored under `document`
    pub fn get(&self, document: DocumentId) -> StoreResult<&ChildRecord> {
        match self.tree.find(document) {
            Ok(record) => {
                self.metrics.increment_lookups();
                Ok(record)
            }
            Err(err) => Err(self.reject("get", Some(document), err.into())),
        }
    }

    /// Every record in the given order
    pub fn list(&self, order: TraversalOrder) -> Vec<&ChildRecord> {
        self.metrics.increment_traversals();
        self.tree.traverse(order)
    }

    /// Listing for a raw order parameter; `None` means in-order.
    ///
    /// # Errors
    ///
    /// `InvalidOrder` unless the parameter is `in`, `pre` or `post`, in any
    /// letter case.
    pub fn list_by_param(&self, order: Option<&str>) -> StoreResult<Listing<'_>> {
        let order = match order.map(str::parse::<TraversalOrder>).transpose() {
            Ok(order) => order.unwrap_or_default(),
            Err(err) => return Err(self.reject("list", None, err.into())),
        };

        let children = self.list(order);
        Ok(Listing {
            total: children.len(),
            order,
            children,
        })
    }

    /// Replace the provided fields of an existing record.
    ///
    /// The payload is validated before the tree is touched, so a rejected
    /// update changes nothing. An empty payload returns the stored record
    /// without counting or logging an update.
    pub fn update(&mut self, document: DocumentId, update: ChildUpdate) -> StoreResult<ChildRecord> {
        let patch = match self.validator.validate_update(update) {
            Ok(patch) => patch,
            Err(err) => return Err(self.reject("update", Some(document), err.into())),
        };

        if patch.is_empty() {
            return match self.tree.find(document) {
                Ok(record) => Ok(record.clone()),
                Err(err) => Err(self.reject("update", Some(document), err.into())),
            };
        }

        let updated = self
            .tree
            .update(document, |record| patch.apply(record))
            .map(ChildRecord::clone);

        match updated {
            Ok(record) => {
                self.metrics.record_updated();
                self.log_mutation(Event::RecordUpdated, document);
                Ok(record)
            }
            Err(err) => Err(self.reject("update", Some(document), err.into())),
        }
    }

    /// Remove and return the record stored under `document`
    pub fn delete(&mut self, document: DocumentId) -> StoreResult<ChildRecord> {
        match self.tree.delete(document) {
            Ok(record) => {
                self.metrics.record_deleted();
                self.log_mutation(Event::RecordDeleted, document);
                Ok(record)
            }
            Err(err) => Err(self.reject("delete", Some(document), err.into())),
        }
    }

    /// Boys and girls per city, sorted by city
    pub fn report(&self) -> Vec<CityGenderReport> {
        report::by_city(self.list(TraversalOrder::In))
    }

    pub fn info(&self) -> TreeInfo {
        self.tree.info()
    }

    pub fn count(&self) -> usize {
        self.tree.count()
    }

    pub fn contains(&self, document: DocumentId) -> bool {
        self.tree.contains(document)
    }

    /// Remove every record
    pub fn clear(&mut self) {
        self.tree.clear();
        self.metrics.set_records(0);
        log_event_with_fields(Event::StoreCleared, &[("tree", self.kind.as_str())]);
    }

    /// Counter snapshot
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Bulk create, in input order.
    ///
    /// Stops at the first rejected record; records before it stay loaded.
    /// Returns the number of records inserted.
    pub fn load<I>(&mut self, children: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = NewChild>,
    {
        let mut loaded = 0;
        for (index, child) in children.into_iter().enumerate() {
            self.create(child).map_err(|source| StoreError::Seed {
                index,
                source: Box::new(source),
            })?;
            loaded += 1;
        }

        let loaded_str = loaded.to_string();
        log_event_with_fields(
            Event::SeedLoaded,
            &[("records", loaded_str.as_str()), ("tree", self.kind.as_str())],
        );
        Ok(loaded)
    }

    fn log_mutation(&self, event: Event, document: DocumentId) {
        let document = document.to_string();
        log_event_with_fields(
            event,
            &[("document", document.as_str()), ("tree", self.kind.as_str())],
        );
    }

    fn reject(&self, operation: &str, document: Option<DocumentId>, err: StoreError) -> StoreError {
        self.metrics.increment_rejected();

        let document = document.map(|d| d.to_string()).unwrap_or_default();
        log_event_with_fields(
            Event::RequestRejected,
            &[
                ("code", err.code()),
                ("document", document.as_str()),
                ("operation", operation),
                ("tree", self.kind.as_str()),
            ],
        );
        err
    }
}

impl<T: SearchTree<ChildRecord>> fmt::Debug for RecordStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("kind", &self.kind)
            .field("records", &self.tree.count())
            .finish()
    }
}

impl Default for OrderedStore {
    fn default() -> Self {
        Self::ordered()
    }
}

impl Default for BalancedStore {
    fn default() -> Self {
        Self::balanced()
    }
}
