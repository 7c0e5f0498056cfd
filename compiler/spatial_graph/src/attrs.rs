//! Named attribute values supplied to the facades.

use sg_backend::{Record, RecordType};
use sg_dtype::{Column, Value};

use crate::error::{Error, Result};

/// Attribute values of one node or edge, by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attrs {
    values: Vec<(String, Value)>,
}

impl Attrs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing an earlier value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Attrs {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut attrs = Attrs::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

/// Attribute columns for a batch, one row per node or edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttrColumns {
    columns: Vec<(String, Column)>,
}

impl AttrColumns {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, column: Column) -> Self {
        self.insert(name, column);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, column: Column) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = column,
            None => self.columns.push((name, column)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn check_known<'a>(ty: &RecordType, mut names: impl Iterator<Item = &'a str>) -> Result<()> {
    match names.find(|name| ty.accessors().get(name).is_none()) {
        Some(name) => Err(Error::UnknownAttribute {
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Construct a record of `ty` from named values.
pub(crate) fn build_record(ty: &RecordType, attrs: &Attrs) -> Result<Record> {
    check_known(ty, attrs.names())?;
    let values = ty
        .accessors()
        .iter()
        .map(|a| {
            attrs.get(a.name()).cloned().ok_or_else(|| Error::MissingAttribute {
                name: a.name().to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ty.construct(&values)?)
}

/// Construct `rows` records of `ty`, row `i` from row `i` of each column.
pub(crate) fn build_records(
    ty: &RecordType,
    columns: &AttrColumns,
    rows: usize,
) -> Result<Vec<Record>> {
    check_known(ty, columns.names())?;
    let columns = ty
        .accessors()
        .iter()
        .map(|a| {
            let column = columns.get(a.name()).ok_or_else(|| Error::MissingAttribute {
                name: a.name().to_string(),
            })?;
            if column.len() == rows {
                Ok(column)
            } else {
                Err(Error::LengthMismatch {
                    expected: rows,
                    found: column.len(),
                })
            }
        })
        .collect::<Result<Vec<_>>>()?;

    (0..rows)
        .map(|i| -> Result<Record> {
            let values: Vec<Value> = columns.iter().filter_map(|c| c.row(i)).collect();
            Ok(ty.construct(&values)?)
        })
        .collect()
}
