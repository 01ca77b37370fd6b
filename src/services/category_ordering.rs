//! Working selection of courses for one category.
//!
//! The position of a course id in the list is its ordinal (1-based). Only
//! the list is ever stored; ordinals are always derived from it, so after
//! any toggle they form a gapless `1..=N`.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::category::Category;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategorySelection {
    category_id: Option<String>,
    course_ids: Vec<String>,
}

impl CategorySelection {
    /// Seeds the selection from a category's stored `courseIdList`. A
    /// repeated id keeps only its first position.
    pub fn select(category: &Category) -> Self {
        Self::from_working_list(category.id.clone(), category.course_id_list.iter().cloned())
    }

    pub fn from_working_list<I>(category_id: Option<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut course_ids: Vec<String> = Vec::new();
        for id in ids {
            if !course_ids.contains(&id) {
                course_ids.push(id);
            }
        }
        Self {
            category_id,
            course_ids,
        }
    }

    /// Removes the course when selected, otherwise appends it with the next
    /// ordinal. Returns whether the course is selected afterwards.
    pub fn toggle(&mut self, course_id: &str) -> bool {
        match self.position(course_id) {
            Some(index) => {
                self.course_ids.remove(index);
                false
            }
            None => {
                self.course_ids.push(course_id.to_string());
                true
            }
        }
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    pub fn course_ids(&self) -> &[String] {
        &self.course_ids
    }

    pub fn is_selected(&self, course_id: &str) -> bool {
        self.position(course_id).is_some()
    }

    pub fn ordinal_of(&self, course_id: &str) -> Option<usize> {
        self.position(course_id).map(|index| index + 1)
    }

    pub fn ordinals(&self) -> BTreeMap<String, usize> {
        self.course_ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id.clone(), index + 1))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.course_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.course_ids.is_empty()
    }

    /// Back to the editor's blank state, as after a save.
    pub fn reset(&mut self) {
        self.category_id = None;
        self.course_ids.clear();
    }

    fn position(&self, course_id: &str) -> Option<usize> {
        self.course_ids.iter().position(|id| id == course_id)
    }
}

/// Selection plus its derived ordinals, the shape the editor screen shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub category_id: Option<String>,
    pub course_id_list: Vec<String>,
    pub ordinals: BTreeMap<String, usize>,
}

impl From<&CategorySelection> for SelectionView {
    fn from(selection: &CategorySelection) -> Self {
        Self {
            category_id: selection.category_id.clone(),
            course_id_list: selection.course_ids.clone(),
            ordinals: selection.ordinals(),
        }
    }
}
