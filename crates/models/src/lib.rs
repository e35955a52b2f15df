use serde::{Deserialize, Deserializer, Serialize};

/// One page of `/api/whereis` results.
///
/// The pagination fields are required; a body without them is not a page.
/// Anything the server adds beyond these fields is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub content: Vec<Record>,
    pub size: u64,
    /// Zero-based page index.
    pub number: u64,
    #[serde(default)]
    pub sort: Vec<SortOrder>,
    pub number_of_elements: u64,
    pub total_pages: u64,
    pub total_elements: u64,
    #[serde(default)]
    pub first_page: bool,
    #[serde(default)]
    pub last_page: bool,
}

/// A single absence entry. Missing or `null` fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    #[serde(deserialize_with = "nullable")]
    pub create_time: String,
    #[serde(deserialize_with = "nullable")]
    pub emp_no: String,
    #[serde(deserialize_with = "nullable")]
    pub emp_name: String,
    #[serde(deserialize_with = "nullable")]
    pub work_place: String,
    /// Compact `YYYYMMDD` date.
    #[serde(deserialize_with = "nullable")]
    pub absence_date: String,
    #[serde(deserialize_with = "nullable")]
    pub absence_time: String,
    #[serde(deserialize_with = "nullable")]
    pub absence_type: String,
    #[serde(deserialize_with = "nullable")]
    pub absence_desc: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortOrder {
    pub direction: Option<String>,
    pub property: Option<String>,
    pub ignore_case: bool,
    pub ascending: bool,
}

fn nullable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Page {
    pub fn decode(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// One-based position of the first item on this page. Saturates on
    /// server values too large to multiply out.
    pub fn first_item(&self) -> u64 {
        self.offset().saturating_add(1)
    }

    /// One-based position of the last item on this page.
    pub fn last_item(&self) -> u64 {
        self.offset().saturating_add(self.number_of_elements)
    }

    /// One-based page index.
    pub fn current_page(&self) -> u64 {
        self.number.saturating_add(1)
    }

    fn offset(&self) -> u64 {
        self.size.saturating_mul(self.number)
    }
}
