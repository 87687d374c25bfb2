// crates/aegis-core/src/core/phone.rs
// ============================================================================
// Module: Aegis Phone Validation
// Description: E.164 phone number validation for contact boundaries.
// Purpose: Reject malformed phone numbers before they reach the store.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Phone numbers must be E.164: a leading `+`, a first digit in `1-9`, and
//! up to fourteen further digits (fifteen digits total). Validation happens
//! at API boundaries; the store itself accepts whatever the caller already
//! validated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum number of digits permitted after the leading `+`.
const MAX_DIGITS: usize = 15;

/// Minimum number of digits permitted after the leading `+`.
const MIN_DIGITS: usize = 2;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Phone validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    /// Number is not in E.164 international format.
    #[error("Phone number must be in E.164 international format (e.g., +92123456789)")]
    InvalidFormat,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a phone number against the E.164 format.
///
/// # Errors
///
/// Returns [`PhoneError::InvalidFormat`] when the number lacks a leading
/// `+`, starts with a zero, contains non-digits, or has an out-of-range
/// digit count.
pub fn validate_e164(phone: &str) -> Result<(), PhoneError> {
    let digits = phone.strip_prefix('+').ok_or(PhoneError::InvalidFormat)?;
    let bytes = digits.as_bytes();
    if bytes.len() < MIN_DIGITS || bytes.len() > MAX_DIGITS {
        return Err(PhoneError::InvalidFormat);
    }
    if !bytes[0].is_ascii_digit() || bytes[0] == b'0' {
        return Err(PhoneError::InvalidFormat);
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(PhoneError::InvalidFormat);
    }
    Ok(())
}
