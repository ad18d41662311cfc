use crate::error::ClientError;
use crate::models::{
    Ack, DeviceOption, Envelope, InventoryCatalog, InventoryItem, InventoryItemUpdate,
    InventoryPage, InventoryQuery, NewBrand, NewInventoryItem, NewModel, Page, StockEntry,
    StockTransfer,
};
use crate::routes;
use crate::transport::{send_json, ApiRequest, Transport};
use crate::validation::{validate_new_inventory_item, validate_stock_entry, Validator};

use super::page_param;

/// Page size requested while collecting the booking dropdown.
const BOOKABLE_PAGE_SIZE: u32 = 100;

/// Inventory table with stock-level counters.
pub fn list_items(
    transport: &dyn Transport,
    query: &InventoryQuery,
) -> Result<InventoryPage, ClientError> {
    let request = ApiRequest::get(routes::INVENTORY_ITEMS)
        .query("page", page_param(query.page))
        .query_opt("status", query.status.as_deref())
        .query_opt("clinic_id", query.clinic_id)
        .query("use_in_trial", query.use_in_trial);
    send_json(transport, request)
}

/// Sellable devices offered when booking a device after a trial.
///
/// The item list is paginated; every page is fetched so the dropdown
/// is complete.
pub fn list_bookable_devices(transport: &dyn Transport) -> Result<Vec<DeviceOption>, ClientError> {
    let mut devices = Vec::new();
    let mut page = 1;
    loop {
        let request = ApiRequest::get(routes::INVENTORY_ITEMS)
            .query("page", page)
            .query("pageSize", BOOKABLE_PAGE_SIZE)
            .query("use_in_trial", false);
        let batch: Page<InventoryItem> = send_json(transport, request)?;
        devices.extend(batch.data.into_iter().map(DeviceOption::from));
        match batch.next_page {
            Some(next) if next > page && next <= batch.total_pages => page = next,
            _ => break,
        }
    }
    tracing::debug!(count = devices.len(), pages = page, "Bookable devices loaded");
    Ok(devices)
}

/// In-stock serial numbers of one inventory item.
pub fn list_serials(transport: &dyn Transport, item_id: i64) -> Result<Vec<String>, ClientError> {
    let request = ApiRequest::get(routes::INVENTORY_SERIAL_LIST).query("inventory_item", item_id);
    let serials: Envelope<Vec<String>> = send_json(transport, request)?;
    Ok(serials.data)
}

pub fn create_item(transport: &dyn Transport, item: &NewInventoryItem) -> Result<Ack, ClientError> {
    validate_new_inventory_item(item)?;
    let request = ApiRequest::post(routes::INVENTORY_ITEM_CREATE).json(item)?;
    let ack = send_json(transport, request)?;
    tracing::info!(product = %item.product_name, "Inventory item created");
    Ok(ack)
}

pub fn update_item(
    transport: &dyn Transport,
    item_id: i64,
    update: &InventoryItemUpdate,
) -> Result<Ack, ClientError> {
    let request = ApiRequest::put(routes::inventory_item_update(item_id)).json(update)?;
    send_json(transport, request)
}

pub fn add_stock(transport: &dyn Transport, entry: &StockEntry) -> Result<Ack, ClientError> {
    validate_stock_entry(entry)?;
    let request = ApiRequest::post(routes::INVENTORY_STOCK_ADD).json(entry)?;
    send_json(transport, request)
}

/// Items awaiting admin approval; `None` lists every clinic.
pub fn list_pending_items(
    transport: &dyn Transport,
    clinic_id: Option<i64>,
) -> Result<Vec<InventoryItem>, ClientError> {
    let request = ApiRequest::get(routes::INVENTORY_PENDING).query_opt("clinic_id", clinic_id);
    let items: Envelope<Vec<InventoryItem>> = send_json(transport, request)?;
    Ok(items.data)
}

pub fn approve_pending_item(transport: &dyn Transport, item_id: i64) -> Result<Ack, ClientError> {
    let ack = send_json(transport, ApiRequest::post(routes::inventory_item_approve(item_id)))?;
    tracing::info!(item_id, "Pending inventory item approved");
    Ok(ack)
}

/// Category, brand and model options for the item form.
///
/// With no filter the backend lists categories; `category` narrows to
/// its brands and `category` + `brand` to that brand's models.
pub fn catalog(
    transport: &dyn Transport,
    category: Option<&str>,
    brand: Option<&str>,
) -> Result<InventoryCatalog, ClientError> {
    let request = ApiRequest::get(routes::INVENTORY_CATALOG)
        .query_opt("category", super::search_param(category))
        .query_opt("brand", super::search_param(brand));
    send_json(transport, request)
}

pub fn create_brand(transport: &dyn Transport, brand: &NewBrand) -> Result<Ack, ClientError> {
    let mut v = Validator::new();
    v.required("name", &brand.name, "Brand name is required")
        .required("category", &brand.category, "Category is required");
    v.finish()?;
    let ack = send_json(transport, ApiRequest::post(routes::INVENTORY_BRAND_CREATE).json(brand)?)?;
    tracing::info!(category = %brand.category, "Brand created");
    Ok(ack)
}

pub fn create_model(transport: &dyn Transport, model: &NewModel) -> Result<Ack, ClientError> {
    let mut v = Validator::new();
    v.required("name", &model.name, "Model name is required")
        .required("category", &model.category, "Category is required");
    v.finish()?;
    let ack = send_json(transport, ApiRequest::post(routes::INVENTORY_MODEL_CREATE).json(model)?)?;
    tracing::info!(brand = model.brand, "Model created");
    Ok(ack)
}

/// Stock movements between clinics, newest first.
pub fn transfer_history(transport: &dyn Transport) -> Result<Vec<StockTransfer>, ClientError> {
    let envelope: Envelope<Vec<StockTransfer>> =
        send_json(transport, ApiRequest::get(routes::INVENTORY_TRANSFER_HISTORY))?;
    Ok(envelope.data)
}
