use std::collections::BTreeSet;

use super::model::{Dataset, Dimension, Record};

// ---------------------------------------------------------------------------
// Filter selection: which values are allowed per dimension
// ---------------------------------------------------------------------------

/// Allowed values for each filter dimension.
///
/// An empty set means nothing is selected for that dimension, so the
/// filtered view is empty.  It never means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub regions: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub segments: BTreeSet<String>,
}

impl FilterSelection {
    /// Every distinct value present in the dataset (i.e., show everything).
    pub fn all(dataset: &Dataset) -> Self {
        FilterSelection {
            regions: dataset.distinct(Dimension::Region).clone(),
            categories: dataset.distinct(Dimension::Category).clone(),
            segments: dataset.distinct(Dimension::Segment).clone(),
        }
    }

    pub fn get(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Region => &self.regions,
            Dimension::Category => &self.categories,
            Dimension::Segment => &self.segments,
        }
    }

    pub fn get_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Region => &mut self.regions,
            Dimension::Category => &mut self.categories,
            Dimension::Segment => &mut self.segments,
        }
    }

    /// Flip a single value in or out of a dimension's selection.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        let selected = self.get_mut(dimension);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    pub fn select_all(&mut self, dimension: Dimension, dataset: &Dataset) {
        *self.get_mut(dimension) = dataset.distinct(dimension).clone();
    }

    pub fn select_none(&mut self, dimension: Dimension) {
        self.get_mut(dimension).clear();
    }

    /// Whether every distinct dataset value is selected in every dimension.
    pub fn is_full(&self, dataset: &Dataset) -> bool {
        Dimension::ALL
            .into_iter()
            .all(|d| dataset.distinct(d).is_subset(self.get(d)))
    }

    /// The conjunctive membership test.
    pub fn matches(&self, record: &Record) -> bool {
        Dimension::ALL
            .into_iter()
            .all(|d| self.get(d).contains(d.value_of(record)))
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Records of a dataset that pass a selection, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Rebuild a view from indices computed earlier by [`filter`].
    /// Indices past the end of `dataset` are dropped.
    pub fn from_indices(dataset: &'a Dataset, mut indices: Vec<usize>) -> Self {
        indices.retain(|&i| i < dataset.len());
        FilteredView { dataset, indices }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Row indices into the dataset, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = &self.dataset.records;
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Apply a selection to a dataset.
///
/// A record passes when its Region, Category and Segment are each in the
/// corresponding selected set.  Values that do not occur in the dataset
/// simply match nothing.
pub fn filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}
