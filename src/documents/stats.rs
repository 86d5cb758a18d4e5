use serde::Serialize;

use super::data::*;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStats {
    pub uploaded: u32,
    pub status: CategoryStatus,
}

impl CategoryStats {
    pub fn compute<'a>(required: u32, documents: impl Iterator<Item = &'a Document>) -> Self {
        let uploaded = documents
            .filter(|document| document.status == DocumentStatus::Uploaded)
            .count() as u32;

        CategoryStats {
            uploaded,
            status: category_status(required, uploaded),
        }
    }
}

/// A category with nothing required stays pending until something is uploaded.
pub fn category_status(required: u32, uploaded: u32) -> CategoryStatus {
    if required > 0 && uploaded >= required {
        CategoryStatus::Completed
    } else if uploaded > 0 {
        CategoryStatus::InProgress
    } else {
        CategoryStatus::Pending
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub id: CategoryID,
    pub name: String,
    pub required: u32,
    pub uploaded: u32,
    pub status: CategoryStatus,
    pub completion_percentage: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummary {
    pub total_required: u32,
    pub total_uploaded: u32,
    pub completion_percentage: u32,
    pub categories: Vec<CategoryProgress>,
}

pub fn completion_percentage(required: u32, uploaded: u32) -> u32 {
    if required == 0 {
        return 0;
    }

    let percentage = (uploaded as f64 / required as f64 * 100.0).round() as u32;
    percentage.min(100)
}

impl ChecklistSummary {
    pub fn from_categories<'a>(categories: impl Iterator<Item = &'a Category>) -> Self {
        let categories: Vec<CategoryProgress> = categories
            .map(|category| CategoryProgress {
                id: category.id.clone(),
                name: category.name.clone(),
                required: category.required,
                uploaded: category.uploaded,
                status: category.status,
                completion_percentage: completion_percentage(category.required, category.uploaded),
            })
            .collect();

        let total_required = categories.iter().map(|c| c.required).sum();
        let total_uploaded = categories.iter().map(|c| c.uploaded).sum();

        ChecklistSummary {
            total_required,
            total_uploaded,
            completion_percentage: completion_percentage(total_required, total_uploaded),
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(status: DocumentStatus) -> Document {
        Document {
            id: "d".to_string(),
            name: "d".to_string(),
            status,
            file_type: "pdf".to_string(),
        }
    }

    #[test]
    fn status_follows_uploaded_against_required() {
        assert_eq!(category_status(3, 0), CategoryStatus::Pending);
        assert_eq!(category_status(3, 1), CategoryStatus::InProgress);
        assert_eq!(category_status(3, 3), CategoryStatus::Completed);
        assert_eq!(category_status(3, 4), CategoryStatus::Completed);
    }

    #[test]
    fn nothing_required_is_pending_until_upload() {
        assert_eq!(category_status(0, 0), CategoryStatus::Pending);
        assert_eq!(category_status(0, 2), CategoryStatus::InProgress);
    }

    #[test]
    fn compute_counts_only_uploaded() {
        let documents = vec![
            doc(DocumentStatus::Uploaded),
            doc(DocumentStatus::Pending),
            doc(DocumentStatus::Overdue),
            doc(DocumentStatus::Uploaded),
        ];

        let stats = CategoryStats::compute(4, documents.iter());

        assert_eq!(
            stats,
            CategoryStats {
                uploaded: 2,
                status: CategoryStatus::InProgress
            }
        );
    }

    #[test]
    fn percentages_round_and_cap() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(8, 6), 75);
        assert_eq!(completion_percentage(19, 15), 79);
        assert_eq!(completion_percentage(2, 5), 100);
    }
}
