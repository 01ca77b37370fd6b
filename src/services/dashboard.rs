use std::collections::HashMap;

use crate::models::category::Category;
use crate::models::course::Course;

pub const ALL_CATEGORIES: &str = "All";

/// Courses shown on the dashboard for a category chip and search term.
///
/// `"All"` lists every course. A category lists its courses in
/// `courseIdList` order, dropping ids that no longer match a course; an
/// unknown title lists nothing. A search term keeps courses whose name
/// contains it, ignoring case.
pub fn filter_courses(
    category_title: &str,
    categories: &[Category],
    all_courses: &[Course],
    search_term: &str,
) -> Vec<Course> {
    let filtered: Vec<&Course> = if category_title == ALL_CATEGORIES {
        all_courses.iter().collect()
    } else {
        let by_id: HashMap<&str, &Course> = all_courses
            .iter()
            .filter_map(|course| course.id.as_deref().map(|id| (id, course)))
            .collect();

        categories
            .iter()
            .find(|category| category.title == category_title)
            .map(|category| {
                category
                    .course_id_list
                    .iter()
                    .filter_map(|id| by_id.get(id.as_str()).copied())
                    .collect()
            })
            .unwrap_or_default()
    };

    let needle = search_term.to_lowercase();
    filtered
        .into_iter()
        .filter(|course| needle.is_empty() || course.course_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Orders the category editor's course palette by name.
pub fn sort_by_name(courses: &mut [Course]) {
    courses.sort_by(|a, b| a.course_name.cmp(&b.course_name));
}
