//! Build styles and prompt composition.

use std::fmt;
use std::str::FromStr;

use crate::error::{ArchitectError, Result};

/// Architectural style attached to a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BuildStyle {
    #[default]
    None,
    Modern,
    Medieval,
    Fantasy,
    SciFi,
    Rustic,
    Futuristic,
    Underwater,
}

impl BuildStyle {
    pub const ALL: [Self; 8] = [
        Self::None,
        Self::Modern,
        Self::Medieval,
        Self::Fantasy,
        Self::SciFi,
        Self::Rustic,
        Self::Futuristic,
        Self::Underwater,
    ];

    /// Display label, also used inside the prompt.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Modern => "Modern",
            Self::Medieval => "Medieval",
            Self::Fantasy => "Fantasy",
            Self::SciFi => "Sci-Fi",
            Self::Rustic => "Rustic",
            Self::Futuristic => "Futuristic",
            Self::Underwater => "Underwater",
        }
    }
}

impl fmt::Display for BuildStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BuildStyle {
    type Err = ArchitectError;

    /// Case-insensitive; `scifi` is accepted for `Sci-Fi`.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "");
        Self::ALL
            .into_iter()
            .find(|style| style.label().to_ascii_lowercase().replace('-', "") == wanted)
            .ok_or_else(|| ArchitectError::UnknownStyle(s.to_string()))
    }
}

/// Build the text sent to the model.
///
/// Fails on an empty or whitespace-only prompt.
pub fn compose_prompt(prompt: &str, style: BuildStyle) -> Result<String> {
    if prompt.trim().is_empty() {
        return Err(ArchitectError::EmptyPrompt);
    }
    Ok(match style {
        BuildStyle::None => prompt.to_string(),
        style => format!(
            "Style: {style}. Building Request: {prompt}. Build a complete but small structure."
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_prompt() {
        assert_eq!(
            compose_prompt("a tower", BuildStyle::Medieval).unwrap(),
            "Style: Medieval. Building Request: a tower. Build a complete but small structure."
        );
        assert_eq!(
            compose_prompt("a ship", BuildStyle::SciFi).unwrap(),
            "Style: Sci-Fi. Building Request: a ship. Build a complete but small structure."
        );
    }

    #[test]
    fn unstyled_prompt_is_passed_through() {
        assert_eq!(compose_prompt("a hut", BuildStyle::None).unwrap(), "a hut");
    }

    #[test]
    fn blank_prompt_is_rejected() {
        assert!(matches!(
            compose_prompt("  \n\t", BuildStyle::Modern),
            Err(ArchitectError::EmptyPrompt)
        ));
        assert!(matches!(
            compose_prompt("", BuildStyle::None),
            Err(ArchitectError::EmptyPrompt)
        ));
    }

    #[test]
    fn parses_labels() {
        for style in BuildStyle::ALL {
            assert_eq!(style.label().parse::<BuildStyle>().unwrap(), style);
        }
        assert_eq!("scifi".parse::<BuildStyle>().unwrap(), BuildStyle::SciFi);
        assert_eq!("UNDERWATER".parse::<BuildStyle>().unwrap(), BuildStyle::Underwater);
        assert!("baroque".parse::<BuildStyle>().is_err());
    }
}
