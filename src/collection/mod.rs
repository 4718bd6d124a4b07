//! Immutable, queryable content collections
//!
//! A [`Collection`] is the result of one successful load: records grouped
//! by type, handed out only as shared references. There is no mutation
//! API; refreshing content means loading a whole new collection. Queries
//! borrow the collection, so results never outlive the snapshot they came
//! from.

use indexmap::IndexMap;

use crate::content::Record;
use crate::schema::Category;

/// All records of one load, partitioned by type name
#[derive(Debug)]
pub struct Collection {
    partitions: IndexMap<String, Vec<Record>>,
}

impl Collection {
    /// Partition loaded records by type
    ///
    /// Every declared type gets a partition even when empty, and records
    /// keep their load order (sorted source paths) within each partition.
    pub(crate) fn from_records(type_names: Vec<String>, records: Vec<Record>) -> Self {
        let mut partitions: IndexMap<String, Vec<Record>> = IndexMap::new();
        for name in type_names {
            partitions.entry(name).or_default();
        }
        for record in records {
            partitions
                .entry(record.doc_type.clone())
                .or_default()
                .push(record);
        }
        Self { partitions }
    }

    /// Start a query over one type's records
    ///
    /// An unknown type name yields an empty query rather than an error.
    pub fn query<'a>(&'a self, doc_type: &str) -> Query<'a> {
        Query::new(self.partition(doc_type))
    }

    /// Query over the built-in post type
    pub fn posts(&self) -> Query<'_> {
        self.query("post")
    }

    /// Query over the built-in project type
    pub fn projects(&self) -> Query<'_> {
        self.query("project")
    }

    /// Records related to the given one: same type and category, itself and
    /// drafts excluded, newest first, at most `limit` results
    ///
    /// Fewer matches simply return a shorter list.
    pub fn related_to<'a>(&'a self, record: &Record, limit: usize) -> Vec<&'a Record> {
        let candidates = self
            .partition(&record.doc_type)
            .iter()
            .filter(|r| !r.draft && r.category == record.category && r.source != record.source)
            .collect();

        let mut related = sort_by_date_descending(candidates);
        related.truncate(limit);
        related
    }

    /// Per-category record counts for one type, drafts excluded
    ///
    /// Categories appear in declaration order; empty ones are skipped.
    pub fn category_counts(&self, doc_type: &str) -> IndexMap<Category, usize> {
        let records = self.partition(doc_type);
        let mut counts = IndexMap::new();
        for category in Category::ALL {
            let n = records
                .iter()
                .filter(|r| !r.draft && r.category == category)
                .count();
            if n > 0 {
                counts.insert(category, n);
            }
        }
        counts
    }

    /// Per-tag record counts for one type, drafts excluded
    ///
    /// Ordered by count descending, then tag name for equal counts.
    pub fn tag_counts(&self, doc_type: &str) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for record in self.partition(doc_type).iter().filter(|r| !r.draft) {
            for tag in &record.tags {
                *counts.entry(tag.clone()).or_default() += 1;
            }
        }
        counts.sort_by(|tag_a, n_a, tag_b, n_b| n_b.cmp(n_a).then_with(|| tag_a.cmp(tag_b)));
        counts
    }

    /// Iterate every record across all types
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.partitions.values().flatten()
    }

    /// Declared type names, in declaration order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.partitions.keys().map(String::as_str)
    }

    /// Total number of records, drafts included
    pub fn len(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    /// Whether the collection holds no records at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn partition(&self, doc_type: &str) -> &[Record] {
        self.partitions
            .get(doc_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Stable date-descending sort: newest first, equal dates keep input order
pub fn sort_by_date_descending<'a>(mut records: Vec<&'a Record>) -> Vec<&'a Record> {
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

/// Builder for filtered views over one type's records
///
/// Drafts are excluded unless [`Query::include_drafts`] opts into preview
/// mode. Terminal methods borrow, so one query can be consumed repeatedly.
pub struct Query<'a> {
    records: &'a [Record],
    drafts: bool,
    filters: Vec<Box<dyn Fn(&Record) -> bool + 'a>>,
}

impl<'a> Query<'a> {
    fn new(records: &'a [Record]) -> Self {
        Self {
            records,
            drafts: false,
            filters: Vec::new(),
        }
    }

    /// Include drafts in the results (preview mode)
    pub fn include_drafts(mut self) -> Self {
        self.drafts = true;
        self
    }

    /// Keep only records in the given category
    pub fn category(mut self, category: Category) -> Self {
        self.filters.push(Box::new(move |r| r.category == category));
        self
    }

    /// Keep only featured records
    pub fn featured(mut self) -> Self {
        self.filters.push(Box::new(|r| r.featured));
        self
    }

    /// Keep only records carrying the given tag
    pub fn tagged(mut self, tag: &str) -> Self {
        let tag = tag.to_string();
        self.filters.push(Box::new(move |r| r.has_tag(&tag)));
        self
    }

    /// Keep only records matching an arbitrary predicate
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + 'a,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Matching records in load order
    pub fn all(&self) -> Vec<&'a Record> {
        self.records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Matching records, newest first
    pub fn newest_first(&self) -> Vec<&'a Record> {
        sort_by_date_descending(self.all())
    }

    /// Number of matching records
    pub fn count(&self) -> usize {
        self.records.iter().filter(|r| self.matches(r)).count()
    }

    /// Look up one matching record by slug
    ///
    /// Absence is an ordinary outcome, not an error: callers that need to
    /// fail on a miss decide that at their own boundary.
    pub fn find_by_slug(&self, slug: &str) -> Option<&'a Record> {
        self.records
            .iter()
            .find(|r| self.matches(r) && r.slug == slug)
    }

    fn matches(&self, record: &Record) -> bool {
        if record.draft && !self.drafts {
            return false;
        }
        self.filters.iter().all(|f| f(record))
    }
}
