//! Request validation.
//!
//! Only `bars` can reject a request. Instrument, style and mode are resolved
//! leniently and never produce errors.

use crate::budget::SynthBudget;
use crate::error::{ErrorCode, SpecError, ValidationError};
use crate::request::{GenerationRequest, Instrument, Mode, Style, SynthParams};

/// Parses a request body and validates it against `budget`.
pub fn parse_request(
    json: &str,
    budget: &SynthBudget,
) -> Result<(GenerationRequest, SynthParams), SpecError> {
    let request: GenerationRequest = serde_json::from_str(json)?;
    let params = validate_request(&request, budget)?;
    Ok((request, params))
}

/// Validates a request and resolves it into synthesizer parameters.
///
/// # Errors
/// - `E001` if `bars` is missing or not an integer
/// - `E002` if `bars` is zero or negative
/// - `E003` if `bars` exceeds the budget's bar limit
pub fn validate_request(
    request: &GenerationRequest,
    budget: &SynthBudget,
) -> Result<SynthParams, ValidationError> {
    let bars = validate_bars(request, budget)?;

    Ok(SynthParams {
        instrument: Instrument::parse_lenient(&request.instrument),
        style: Style::parse_lenient(&request.style),
        mode: Mode::parse_lenient(&request.mode),
        bars,
    })
}

fn validate_bars(request: &GenerationRequest, budget: &SynthBudget) -> Result<u32, ValidationError> {
    let raw = request.bars.as_ref().ok_or_else(|| {
        ValidationError::with_path(ErrorCode::InvalidBars, "bars is required", "bars")
    })?;

    let bars = raw.as_integer().ok_or_else(|| {
        ValidationError::with_path(
            ErrorCode::InvalidBars,
            format!("bars must be an integer, got {:?}", raw),
            "bars",
        )
    })?;

    if bars <= 0 {
        return Err(ValidationError::with_path(
            ErrorCode::NonPositiveBars,
            format!("bars must be at least 1, got {}", bars),
            "bars",
        ));
    }

    let limit = budget.bar_limit();
    if bars > limit as i64 {
        return Err(ValidationError::with_path(
            ErrorCode::BarsExceedBudget,
            format!("bars must be at most {}, got {}", limit, bars),
            "bars",
        ));
    }

    Ok(bars as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::BarsValue;
    use pretty_assertions::assert_eq;

    fn request_with_bars(bars: Option<BarsValue>) -> GenerationRequest {
        GenerationRequest {
            bars,
            ..GenerationRequest::new("piano", "pop", "melody", 4)
        }
    }

    #[test]
    fn test_valid_request() {
        let request = GenerationRequest::new("synth", "jazz", "chord", 8);
        let params = validate_request(&request, &SynthBudget::default()).unwrap();
        assert_eq!(
            params,
            SynthParams::new(Instrument::Synth, Style::Jazz, Mode::Chord, 8)
        );
    }

    #[test]
    fn test_unknown_names_are_not_errors() {
        let request = GenerationRequest::new("kazoo", "polka", "remix", 2);
        let params = validate_request(&request, &SynthBudget::default()).unwrap();
        assert_eq!(params.instrument, Instrument::Piano);
        assert_eq!(params.style, Style::Pop);
        assert_eq!(params.mode, Mode::Continue);
    }

    #[test]
    fn test_missing_bars() {
        let err = validate_request(&request_with_bars(None), &SynthBudget::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidBars);
        assert_eq!(err.path.as_deref(), Some("bars"));
    }

    #[test]
    fn test_non_numeric_bars() {
        let request = request_with_bars(Some(BarsValue::Text("lots".to_string())));
        let err = validate_request(&request, &SynthBudget::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidBars);

        let request = request_with_bars(Some(BarsValue::Float(f64::NAN)));
        let err = validate_request(&request, &SynthBudget::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidBars);
    }

    #[test]
    fn test_zero_and_negative_bars() {
        for bars in [0, -1, -64] {
            let request = request_with_bars(Some(BarsValue::Integer(bars)));
            let err = validate_request(&request, &SynthBudget::default()).unwrap_err();
            assert_eq!(err.code, ErrorCode::NonPositiveBars, "bars = {}", bars);
        }
    }

    #[test]
    fn test_bars_over_budget() {
        let request = GenerationRequest::new("piano", "pop", "melody", 65);
        let err = validate_request(&request, &SynthBudget::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::BarsExceedBudget);

        let request = GenerationRequest::new("piano", "pop", "melody", 32);
        assert!(validate_request(&request, &SynthBudget::default()).is_ok());
        let err = validate_request(&request, &SynthBudget::strict()).unwrap_err();
        assert_eq!(err.code, ErrorCode::BarsExceedBudget);
    }

    #[test]
    fn test_oversized_budget_still_rejects_past_max_bars() {
        let budget = SynthBudget { max_bars: 100 };
        let request = GenerationRequest::new("piano", "pop", "melody", 80);
        let err = validate_request(&request, &budget).unwrap_err();
        assert_eq!(err.code, ErrorCode::BarsExceedBudget);
        assert!(err.message.contains("at most 64"));
    }

    #[test]
    fn test_string_bars_accepted() {
        let request = request_with_bars(Some(BarsValue::Text("16".to_string())));
        let params = validate_request(&request, &SynthBudget::default()).unwrap();
        assert_eq!(params.bars, 16);
    }

    #[test]
    fn test_parse_request_malformed_json() {
        let err = parse_request("{not json", &SynthBudget::default()).unwrap_err();
        assert!(matches!(err, SpecError::JsonParse(_)));
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_parse_request_validation_failure() {
        let err = parse_request(
            r#"{"instrument": "piano", "style": "pop", "mode": "melody", "bars": 0}"#,
            &SynthBudget::default(),
        )
        .unwrap_err();
        assert_eq!(err.code(), "E002");
    }

    #[test]
    fn test_parse_request_success() {
        let (request, params) = parse_request(
            r#"{"instrument": "drums", "style": "edm", "mode": "beat", "bars": 2, "seed": 9}"#,
            &SynthBudget::default(),
        )
        .unwrap();
        assert_eq!(request.seed, Some(9));
        assert_eq!(params.instrument, Instrument::Drums);
        assert_eq!(params.bars, 2);
    }
}
