//! AWS Lambda handler for running retirement projections
//!
//! Accepts a projection request as the JSON body of a Lambda Function URL call
//! and returns the summary plus per-age rows.

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use retirement_projector::service::handle_request;
use retirement_projector::InputError;
use serde_json::{json, Value};

fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": "POST, OPTIONS",
        "Access-Control-Allow-Headers": "Content-Type",
    })
}

fn error_response(status: u16, message: &str) -> Value {
    json!({
        "statusCode": status,
        "headers": cors_headers(),
        "body": json!({ "error": message }).to_string(),
    })
}

fn json_response(body: String) -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": body,
    })
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<Value, Error> {
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return Ok(json!({ "statusCode": 200, "headers": cors_headers() }));
    }

    if request.is_base64_encoded {
        return Ok(error_response(400, "base64-encoded bodies are not supported"));
    }

    let body = request.body.unwrap_or_default();
    match handle_request(&body) {
        Ok(response) => {
            log::info!(
                "projected {} years in {} ms",
                response.years,
                response.execution_time_ms
            );
            Ok(json_response(serde_json::to_string(&response)?))
        }
        Err(err @ (InputError::Io(_) | InputError::Csv(_))) => {
            log::error!("projection failed: {}", err);
            Ok(error_response(500, &err.to_string()))
        }
        Err(err) => Ok(error_response(400, &err.to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
