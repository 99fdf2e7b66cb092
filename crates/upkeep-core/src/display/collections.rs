//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items with a consistent structure and prints a
//! short notice for an empty collection.

use std::{fmt, ops::Index};

use serde::Serialize;

use super::models::fmt_work_order_row;
use crate::models::{Checklist, PlanSummary, WorkOrder};

macro_rules! collection_wrapper {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

collection_wrapper!(
    /// Plan summaries for list views.
    PlanSummaries,
    PlanSummary
);
collection_wrapper!(
    /// Checklist templates.
    Checklists,
    Checklist
);
collection_wrapper!(
    /// Work orders in their compact list form.
    WorkOrders,
    WorkOrder
);

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for Checklists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No checklists found.")
        } else {
            for checklist in &self.0 {
                write!(f, "{checklist}")?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for WorkOrders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No work orders found.")
        } else {
            for order in &self.0 {
                fmt_work_order_row(order, f)?;
            }
            Ok(())
        }
    }
}
