use crate::domain::ports::StateStore;
use crate::utils::error::{DeskError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One filter per column, tagged by the column's type. Each variant carries
/// only the fields that filter kind needs, so nothing downstream has to
/// sniff value shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnFilter {
    Text {
        contains: String,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Date {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    Boolean {
        value: bool,
    },
    Enum {
        any_of: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnView {
    pub name: String,
    pub visible: bool,
}

/// Serializable per-page table state: filters, column layout, sort,
/// pagination and the current row selection. Owned by the page command;
/// persistence happens only through explicit [`TableState::load`] /
/// [`TableState::persist`] calls against a [`StateStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub page_key: String,
    pub page: u32,
    pub page_size: u32,
    pub sort_by: Option<String>,
    pub descending: bool,
    pub filters: BTreeMap<String, ColumnFilter>,
    pub columns: Vec<ColumnView>,
    pub selection: Vec<String>,
}

impl TableState {
    pub fn new(page_key: &str, page_size: u32, columns: &[&str]) -> Self {
        Self {
            page_key: page_key.to_string(),
            page: 1,
            page_size,
            sort_by: None,
            descending: false,
            filters: BTreeMap::new(),
            columns: columns
                .iter()
                .map(|name| ColumnView {
                    name: name.to_string(),
                    visible: true,
                })
                .collect(),
            selection: Vec::new(),
        }
    }

    /// Loads the persisted state for `page_key`, or the given default when
    /// nothing was saved yet. A corrupt blob is an error rather than a
    /// silent reset.
    pub async fn load<S: StateStore>(store: &S, default: TableState) -> Result<Self> {
        let blob_name = format!("{}.state.json", default.page_key);
        match store.read_state(&blob_name).await? {
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| DeskError::StateError {
                    message: format!("cannot parse {}: {}", blob_name, e),
                })
            }
            None => Ok(default),
        }
    }

    pub async fn persist<S: StateStore>(&self, store: &S) -> Result<()> {
        let blob_name = format!("{}.state.json", self.page_key);
        let bytes = serde_json::to_vec_pretty(self)?;
        store.write_state(&blob_name, &bytes).await
    }

    pub fn set_filter(&mut self, column: &str, filter: ColumnFilter) {
        self.filters.insert(column.to_string(), filter);
        self.page = 1; // filter changes restart pagination
    }

    pub fn clear_filter(&mut self, column: &str) {
        self.filters.remove(column);
        self.page = 1;
    }

    pub fn set_sort(&mut self, column: &str, descending: bool) {
        self.sort_by = Some(column.to_string());
        self.descending = descending;
    }

    pub fn set_column_visible(&mut self, column: &str, visible: bool) {
        if let Some(view) = self.columns.iter_mut().find(|c| c.name == column) {
            view.visible = visible;
        }
    }

    /// Moves `column` to `index` in the display order, clamping past the end.
    pub fn move_column(&mut self, column: &str, index: usize) {
        if let Some(from) = self.columns.iter().position(|c| c.name == column) {
            let view = self.columns.remove(from);
            let to = index.min(self.columns.len());
            self.columns.insert(to, view);
        }
    }

    pub fn visible_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Renders the state into the backend's query-string contract:
    /// `page`/`page_size`/`sort`/`order` plus one `filter.<column>` entry
    /// per filter operator.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ];

        if let Some(sort_by) = &self.sort_by {
            params.push(("sort".to_string(), sort_by.clone()));
            params.push((
                "order".to_string(),
                if self.descending { "desc" } else { "asc" }.to_string(),
            ));
        }

        for (column, filter) in &self.filters {
            let key = format!("filter.{}", column);
            match filter {
                ColumnFilter::Text { contains } => {
                    params.push((key, format!("contains:{}", contains)));
                }
                ColumnFilter::Number { min, max } => {
                    if let Some(min) = min {
                        params.push((key.clone(), format!("min:{}", min)));
                    }
                    if let Some(max) = max {
                        params.push((key, format!("max:{}", max)));
                    }
                }
                ColumnFilter::Date { from, to } => {
                    if let Some(from) = from {
                        params.push((key.clone(), format!("from:{}", from)));
                    }
                    if let Some(to) = to {
                        params.push((key, format!("to:{}", to)));
                    }
                }
                ColumnFilter::Boolean { value } => {
                    params.push((key, format!("eq:{}", value)));
                }
                ColumnFilter::Enum { any_of } => {
                    params.push((key, format!("in:{}", any_of.join(","))));
                }
            }
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MemoryStore {
        blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl StateStore for MemoryStore {
        async fn read_state(&self, name: &str) -> Result<Option<Vec<u8>>> {
            Ok(self.blobs.lock().await.get(name).cloned())
        }

        async fn write_state(&self, name: &str, data: &[u8]) -> Result<()> {
            self.blobs
                .lock()
                .await
                .insert(name.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn listings_state() -> TableState {
        TableState::new("listings", 50, &["sku", "title", "price", "quantity"])
    }

    #[test]
    fn query_params_carry_pagination_and_sort() {
        let mut state = listings_state();
        state.page = 3;
        state.set_sort("price", true);

        let params = state.to_query_params();
        assert!(params.contains(&("page".to_string(), "3".to_string())));
        assert!(params.contains(&("page_size".to_string(), "50".to_string())));
        assert!(params.contains(&("sort".to_string(), "price".to_string())));
        assert!(params.contains(&("order".to_string(), "desc".to_string())));
    }

    #[test]
    fn each_filter_kind_renders_its_own_operator() {
        let mut state = listings_state();
        state.set_filter(
            "title",
            ColumnFilter::Text {
                contains: "vintage".to_string(),
            },
        );
        state.set_filter(
            "price",
            ColumnFilter::Number {
                min: Some(10.0),
                max: Some(50.0),
            },
        );
        state.set_filter(
            "status",
            ColumnFilter::Enum {
                any_of: vec!["active".to_string(), "ended".to_string()],
            },
        );

        let params = state.to_query_params();
        assert!(params.contains(&("filter.title".to_string(), "contains:vintage".to_string())));
        assert!(params.contains(&("filter.price".to_string(), "min:10".to_string())));
        assert!(params.contains(&("filter.price".to_string(), "max:50".to_string())));
        assert!(params.contains(&("filter.status".to_string(), "in:active,ended".to_string())));
    }

    #[test]
    fn setting_a_filter_resets_to_first_page() {
        let mut state = listings_state();
        state.page = 7;
        state.set_filter("status", ColumnFilter::Boolean { value: true });
        assert_eq!(state.page, 1);
    }

    #[test]
    fn column_order_and_visibility_drive_visible_columns() {
        let mut state = listings_state();
        state.set_column_visible("title", false);
        state.move_column("quantity", 0);
        assert_eq!(state.visible_columns(), vec!["quantity", "sku", "price"]);
    }

    #[tokio::test]
    async fn load_returns_default_when_nothing_saved() {
        let store = MemoryStore::default();
        let state = TableState::load(&store, listings_state()).await.unwrap();
        assert_eq!(state, listings_state());
    }

    #[tokio::test]
    async fn persist_then_load_round_trips_the_page_state() {
        let store = MemoryStore::default();

        let mut state = listings_state();
        state.set_filter(
            "listed_at",
            ColumnFilter::Date {
                from: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
                to: None,
            },
        );
        state.selection = vec!["AB001-AB003".to_string()];
        state.persist(&store).await.unwrap();

        let loaded = TableState::load(&store, listings_state()).await.unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn corrupt_state_blob_surfaces_a_state_error() {
        let store = MemoryStore::default();
        store
            .write_state("listings.state.json", b"{not json")
            .await
            .unwrap();

        let err = TableState::load(&store, listings_state()).await.unwrap_err();
        assert!(matches!(err, DeskError::StateError { .. }));
    }
}
