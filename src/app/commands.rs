use crate::core::batch::{send_selection_to_batch, BatchHandoff};
use crate::core::expander::expand_selection;
use crate::core::export::{listing_field, listings_to_csv};
use crate::core::table::{ColumnFilter, TableState};
use crate::core::{ConfigProvider, ListingApi, StateStore};
use crate::domain::model::{
    CategorySchema, Listing, MetadataReport, Page, SkuItem, SyncKind, SyncReport,
};
use crate::utils::error::{DeskError, Result};
use chrono::NaiveDate;

pub const LISTING_COLUMNS: &[&str] = &[
    "sku",
    "item_id",
    "title",
    "category_id",
    "price",
    "quantity",
    "status",
    "profit",
    "listed_at",
    "updated_at",
];

pub const INVENTORY_COLUMNS: &[&str] = &[
    "sku",
    "product_name",
    "stock",
    "cost",
    "supplier",
    "updated_at",
];

/// Shared table options coming off the CLI: pagination, filter overrides
/// and sorting.
#[derive(Debug, Clone, Default)]
pub struct TableArgs {
    pub page: Option<u32>,
    pub filters: Vec<String>,
    pub clear_filters: Vec<String>,
    pub sort: Option<String>,
    pub descending: bool,
}

#[derive(Debug)]
pub struct TableView<T> {
    pub state: TableState,
    pub page: Page<T>,
}

fn default_listings_state<C: ConfigProvider>(config: &C) -> TableState {
    TableState::new("listings", config.page_size(), LISTING_COLUMNS)
}

fn default_inventory_state<C: ConfigProvider>(config: &C) -> TableState {
    TableState::new("inventory", config.page_size(), INVENTORY_COLUMNS)
}

/// The listings page: load persisted state, apply CLI overrides, fetch one
/// page, persist the state back. Persisting after the fetch is the page's
/// single explicit save point.
#[allow(clippy::too_many_arguments)]
pub async fn listings_page<A, S, C>(
    api: &A,
    store: &S,
    config: &C,
    args: &TableArgs,
    show_columns: &[String],
    hide_columns: &[String],
    select: &[String],
) -> Result<TableView<Listing>>
where
    A: ListingApi,
    S: StateStore,
    C: ConfigProvider,
{
    let mut state = TableState::load(store, default_listings_state(config)).await?;
    apply_table_args(&mut state, args)?;

    for column in show_columns {
        state.set_column_visible(column, true);
    }
    for column in hide_columns {
        state.set_column_visible(column, false);
    }
    if !select.is_empty() {
        state.selection = select.to_vec();
    }

    let page = api.fetch_listings(&state.to_query_params()).await?;
    tracing::info!(
        "Fetched {} of {} listings (page {}/{})",
        page.items.len(),
        page.total,
        page.page,
        page.page_count()
    );

    state.persist(store).await?;
    Ok(TableView { state, page })
}

pub async fn inventory_page<A, S, C>(
    api: &A,
    store: &S,
    config: &C,
    args: &TableArgs,
) -> Result<TableView<SkuItem>>
where
    A: ListingApi,
    S: StateStore,
    C: ConfigProvider,
{
    let mut state = TableState::load(store, default_inventory_state(config)).await?;
    apply_table_args(&mut state, args)?;

    let page = api.fetch_inventory(&state.to_query_params()).await?;
    tracing::info!(
        "Fetched {} of {} inventory rows (page {}/{})",
        page.items.len(),
        page.total,
        page.page,
        page.page_count()
    );

    state.persist(store).await?;
    Ok(TableView { state, page })
}

/// Sends the selection to the batch view. With no SKUs on the command line
/// the listings page's saved selection is used, mirroring the table's
/// checked rows.
pub async fn batch_command<A, S, C>(
    api: &A,
    store: &S,
    config: &C,
    skus: &[String],
) -> Result<BatchHandoff>
where
    A: ListingApi,
    S: StateStore,
    C: ConfigProvider,
{
    let selected = effective_selection(store, config, skus).await?;
    send_selection_to_batch(api, &selected).await
}

/// Bulk SEO/title generation; selection handling is identical to the batch
/// flow, expansion included.
pub async fn generate_command<A, S, C>(
    api: &A,
    store: &S,
    config: &C,
    skus: &[String],
) -> Result<MetadataReport>
where
    A: ListingApi,
    S: StateStore,
    C: ConfigProvider,
{
    let selected = effective_selection(store, config, skus).await?;
    let expanded = crate::core::batch::prepare_selection(&selected)?;
    tracing::info!("Generating metadata for {} SKUs", expanded.len());
    api.generate_metadata(&expanded).await
}

pub async fn sync_command<A: ListingApi>(api: &A, kind: SyncKind) -> Result<SyncReport> {
    tracing::info!("Triggering {} sync", kind.as_path());
    api.run_sync(kind).await
}

pub async fn schema_command<A: ListingApi>(api: &A, category_id: &str) -> Result<CategorySchema> {
    api.fetch_category_schema(category_id).await
}

/// Exports the listings page the saved state describes, honouring column
/// visibility and order. Returns the written path.
pub async fn export_command<A, S, C>(
    api: &A,
    store: &S,
    config: &C,
    output_path: &str,
) -> Result<String>
where
    A: ListingApi,
    S: StateStore,
    C: ConfigProvider,
{
    let state = TableState::load(store, default_listings_state(config)).await?;
    let page = api.fetch_listings(&state.to_query_params()).await?;
    let csv = listings_to_csv(&page.items, &state.visible_columns())?;
    std::fs::write(output_path, csv)?;
    tracing::info!("Exported {} listings to {}", page.items.len(), output_path);
    Ok(output_path.to_string())
}

async fn effective_selection<S: StateStore, C: ConfigProvider>(
    store: &S,
    config: &C,
    skus: &[String],
) -> Result<Vec<String>> {
    if !skus.is_empty() {
        return Ok(skus.to_vec());
    }
    let state = TableState::load(store, default_listings_state(config)).await?;
    Ok(state.selection)
}

fn apply_table_args(state: &mut TableState, args: &TableArgs) -> Result<()> {
    for column in &args.clear_filters {
        state.clear_filter(column);
    }
    for filter_arg in &args.filters {
        apply_filter_override(state, filter_arg)?;
    }
    if let Some(sort) = &args.sort {
        state.set_sort(sort, args.descending);
    }
    // page override comes last so filter resets do not clobber it
    if let Some(page) = args.page {
        state.page = page.max(1);
    }
    Ok(())
}

/// Parses one `--filter column=op:value` override into the column's typed
/// filter. Range operators (`min`/`max`, `from`/`to`) merge with an
/// existing filter of the same kind so both bounds can be given as two
/// flags.
fn apply_filter_override(state: &mut TableState, arg: &str) -> Result<()> {
    let invalid = |reason: &str| DeskError::InvalidConfigValueError {
        field: "filter".to_string(),
        value: arg.to_string(),
        reason: reason.to_string(),
    };

    let (column, spec) = arg.split_once('=').ok_or_else(|| invalid("expected column=op:value"))?;
    let (op, value) = spec
        .split_once(':')
        .ok_or_else(|| invalid("expected column=op:value"))?;

    let filter = match op {
        "contains" => ColumnFilter::Text {
            contains: value.to_string(),
        },
        "min" | "max" => {
            let bound: f64 = value.parse().map_err(|_| invalid("not a number"))?;
            let (mut min, mut max) = match state.filters.get(column) {
                Some(ColumnFilter::Number { min, max }) => (*min, *max),
                _ => (None, None),
            };
            if op == "min" {
                min = Some(bound);
            } else {
                max = Some(bound);
            }
            ColumnFilter::Number { min, max }
        }
        "from" | "to" => {
            let date: NaiveDate = value.parse().map_err(|_| invalid("not a date (YYYY-MM-DD)"))?;
            let (mut from, mut to) = match state.filters.get(column) {
                Some(ColumnFilter::Date { from, to }) => (*from, *to),
                _ => (None, None),
            };
            if op == "from" {
                from = Some(date);
            } else {
                to = Some(date);
            }
            ColumnFilter::Date { from, to }
        }
        "eq" => {
            let value: bool = value.parse().map_err(|_| invalid("not true/false"))?;
            ColumnFilter::Boolean { value }
        }
        "in" => ColumnFilter::Enum {
            any_of: value.split(',').map(str::to_string).collect(),
        },
        _ => return Err(invalid("unknown operator")),
    };

    state.set_filter(column, filter);
    Ok(())
}

pub fn render_listings(view: &TableView<Listing>) {
    let columns = view.state.visible_columns();
    println!("{}", columns.join(" | "));
    for listing in &view.page.items {
        let row: Vec<String> = columns
            .iter()
            .map(|column| listing_field(listing, column))
            .collect();
        println!("{}", row.join(" | "));
    }
    println!(
        "page {}/{} ({} listings total)",
        view.page.page,
        view.page.page_count(),
        view.page.total
    );
}

pub fn render_inventory(view: &TableView<SkuItem>) {
    let columns = view.state.visible_columns();
    println!("{}", columns.join(" | "));
    for item in &view.page.items {
        let row: Vec<String> = columns
            .iter()
            .map(|column| inventory_field(item, column))
            .collect();
        println!("{}", row.join(" | "));
    }
    println!(
        "page {}/{} ({} rows total)",
        view.page.page,
        view.page.page_count(),
        view.page.total
    );
}

fn inventory_field(item: &SkuItem, column: &str) -> String {
    match column {
        "sku" => item.sku.clone(),
        "product_name" => item.product_name.clone(),
        "stock" => item.stock.to_string(),
        "cost" => format!("{:.2}", item.cost),
        "supplier" => item.supplier.clone().unwrap_or_default(),
        "updated_at" => item
            .updated_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

pub fn render_expansion(inputs: &[String]) {
    for sku in expand_selection(inputs) {
        println!("{}", sku);
    }
}

pub fn render_metadata_report(report: &MetadataReport) {
    for generated in &report.generated {
        println!("{}: {}", generated.sku, generated.title);
        if let Some(description) = &generated.seo_description {
            println!("  {}", description);
        }
        if !generated.keywords.is_empty() {
            println!("  keywords: {}", generated.keywords.join(", "));
        }
    }
    for failure in &report.failures {
        println!("{}: FAILED ({})", failure.sku, failure.reason);
    }
    println!(
        "{} generated, {} failed",
        report.generated.len(),
        report.failures.len()
    );
}

pub fn render_sync_report(report: &SyncReport) {
    println!(
        "processed {} (created {}, updated {}, failed {})",
        report.processed, report.created, report.updated, report.failed
    );
    for error in &report.errors {
        println!("  {}: {}", error.sku, error.reason);
    }
}

pub fn render_schema(schema: &CategorySchema) {
    println!("{} ({})", schema.category_name, schema.category_id);
    for field in &schema.fields {
        let mut line = format!("  {:?} {} [{}]", field.requirement, field.name, field.data_type);
        if let Some(max_length) = field.max_length {
            line.push_str(&format!(" max {}", max_length));
        }
        println!("{}", line);
        if !field.allowed_values.is_empty() {
            println!("    allowed: {}", field.allowed_values.join(", "));
        }
    }
}
