use crate::domain::envelope::{Envelope, RETURN_FAIL};
use crate::error::{GatewayError, Result};
use tracing::warn;

/// Classifies a parsed gateway response.
///
/// Checks run in a fixed order: protocol failure, then business failure,
/// then the presence of `expected_payload` (if the call has one).
pub fn validate_response(envelope: Envelope, expected_payload: Option<&str>) -> Result<Envelope> {
    if envelope.return_code() == Some(RETURN_FAIL) {
        let message = envelope.return_msg().unwrap_or_default().to_owned();
        warn!(%message, "gateway rejected request");
        return Err(GatewayError::Protocol(message));
    }

    if envelope.result_code() == Some(RETURN_FAIL) {
        let code = envelope.err_code().unwrap_or_default().to_owned();
        warn!(%code, "gateway reported business failure");
        return Err(GatewayError::Business {
            code,
            message: envelope.err_msg().map(str::to_owned),
        });
    }

    if let Some(field) = expected_payload
        && envelope.get(field).is_none_or(str::is_empty)
    {
        return Err(GatewayError::MissingData(field.to_owned()));
    }

    Ok(envelope)
}
