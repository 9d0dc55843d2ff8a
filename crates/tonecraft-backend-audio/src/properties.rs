//! Musical property tables.
//!
//! Maps an instrument and style to the base frequency, harmonic series and
//! rhythm gate that the generators render from. Every lookup has a default
//! row, so resolution never fails.

use tonecraft_spec::{Instrument, Style};

/// Number of steps in a rhythm gate pattern.
pub const GATE_STEPS: usize = 8;

/// Properties derived from an instrument and style.
#[derive(Debug, Clone, PartialEq)]
pub struct MusicalProperties {
    /// Fundamental frequency in Hz after the style multiplier.
    pub base_frequency: f64,
    /// Relative amplitude of each harmonic (index 0 = fundamental).
    pub harmonics: &'static [f64],
    /// Eight-step intensity pattern in [0, 1], used by the beat generator.
    pub rhythm_gate: [f64; GATE_STEPS],
}

/// Base frequency (Hz) and harmonic series for an instrument.
pub fn instrument_timbre(instrument: Instrument) -> (f64, &'static [f64]) {
    match instrument {
        Instrument::Piano => (440.0, &[1.0, 0.5, 0.25, 0.125]),
        Instrument::Guitar => (330.0, &[1.0, 0.6, 0.3, 0.15, 0.1]),
        Instrument::Bass => (110.0, &[1.0, 0.8, 0.4, 0.2]),
        Instrument::Drums => (60.0, &[1.0, 0.3, 0.1]),
        Instrument::Synth => (523.0, &[1.0, 0.7, 0.5, 0.3, 0.2]),
        Instrument::Strings => (440.0, &[1.0, 0.8, 0.6, 0.4, 0.2]),
    }
}

/// Multiplier applied to the instrument's base frequency.
pub fn style_frequency_multiplier(style: Style) -> f64 {
    match style {
        Style::Jazz => 0.8,
        Style::Edm => 1.2,
        Style::Classical => 0.9,
        Style::Rock => 1.1,
        Style::Lofi | Style::Pop => 1.0,
    }
}

/// Eight-step rhythm gate for a style.
pub fn rhythm_gate(style: Style) -> [f64; GATE_STEPS] {
    match style {
        Style::Lofi => [1.0, 0.0, 0.5, 0.0, 0.8, 0.0, 0.3, 0.0],
        Style::Edm => [1.0, 0.5, 1.0, 0.5, 1.0, 0.5, 1.0, 0.5],
        Style::Jazz => [1.0, 0.0, 0.7, 0.3, 0.5, 0.0, 0.8, 0.2],
        Style::Rock => [1.0, 0.0, 0.8, 0.0, 1.0, 0.0, 0.6, 0.0],
        Style::Pop => [1.0, 0.3, 0.6, 0.3, 0.8, 0.3, 0.5, 0.3],
        Style::Classical => [1.0, 0.2, 0.4, 0.6, 0.8, 0.6, 0.4, 0.2],
    }
}

/// Resolves the musical properties for an instrument and style.
pub fn resolve(instrument: Instrument, style: Style) -> MusicalProperties {
    let (base, harmonics) = instrument_timbre(instrument);
    let properties = MusicalProperties {
        base_frequency: base * style_frequency_multiplier(style),
        harmonics,
        rhythm_gate: rhythm_gate(style),
    };
    log::debug!(
        "resolved {}/{}: base {:.2} Hz, {} harmonics",
        instrument,
        style,
        properties.base_frequency,
        harmonics.len()
    );
    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_style_scales_base_frequency() {
        let props = resolve(Instrument::Synth, Style::Jazz);
        assert!((props.base_frequency - 418.4).abs() < 1e-9);

        let props = resolve(Instrument::Bass, Style::Edm);
        assert!((props.base_frequency - 132.0).abs() < 1e-9);

        let props = resolve(Instrument::Guitar, Style::Rock);
        assert!((props.base_frequency - 363.0).abs() < 1e-9);

        let props = resolve(Instrument::Piano, Style::Classical);
        assert!((props.base_frequency - 396.0).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_styles_keep_base_frequency() {
        for style in [Style::Lofi, Style::Pop] {
            assert_eq!(resolve(Instrument::Piano, style).base_frequency, 440.0);
        }
    }

    #[test]
    fn test_unknown_names_resolve_to_defaults() {
        let kazoo = resolve(
            Instrument::parse_lenient("kazoo"),
            Style::parse_lenient("polka"),
        );
        let piano_pop = resolve(Instrument::Piano, Style::Pop);
        assert_eq!(kazoo, piano_pop);
        assert_eq!(kazoo.harmonics, &[1.0, 0.5, 0.25, 0.125]);
        assert_eq!(kazoo.rhythm_gate, [1.0, 0.3, 0.6, 0.3, 0.8, 0.3, 0.5, 0.3]);
    }

    #[test]
    fn test_harmonics_start_with_fundamental() {
        for instrument in Instrument::ALL {
            let (_, harmonics) = instrument_timbre(instrument);
            assert_eq!(harmonics[0], 1.0, "{}", instrument);
        }
    }

    #[test]
    fn test_gates_in_unit_range() {
        for style in Style::ALL {
            for step in rhythm_gate(style) {
                assert!((0.0..=1.0).contains(&step), "{} step {}", style, step);
            }
        }
    }
}
