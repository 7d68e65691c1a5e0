use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use service::customer::domain::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest};

use crate::{
    errors::JsonApiError,
    extract::{ApiJson, ApiPath},
    routes::AppState,
};

#[utoipa::path(
    get, path = "/api/v1/customers", tag = "customers",
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::CustomerDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, JsonApiError> {
    let customers = state.customers.get_all_customers().await?;
    info!(count = customers.len(), "list customers");
    Ok(Json(customers))
}

#[utoipa::path(
    get, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CustomerDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Customer>, JsonApiError> {
    let customer = state.customers.get_customer(id).await?;
    Ok(Json(customer))
}

#[utoipa::path(
    post, path = "/api/v1/customers", tag = "customers",
    request_body = crate::openapi::CustomerRegistrationRequestDoc,
    responses(
        (status = 200, description = "Registered"),
        (status = 409, description = "Email taken"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CustomerRegistrationRequest>,
) -> Result<StatusCode, JsonApiError> {
    info!(email = %input.email, "customer_create_request");
    state.customers.add_customer(input).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    put, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = crate::openapi::CustomerUpdateRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CustomerDoc),
        (status = 400, description = "No data changes"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email taken")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<CustomerUpdateRequest>,
) -> Result<Json<Customer>, JsonApiError> {
    let customer = state.customers.update_customer(id, input).await?;
    Ok(Json(customer))
}

#[utoipa::path(
    delete, path = "/api/v1/customers/{id}", tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    state.customers.delete_customer_by_id(id).await?;
    Ok(StatusCode::OK)
}
