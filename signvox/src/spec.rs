use crate::bitmap::PixelBitmap;
use crate::error::ValidationError;

/// Smallest accepted width or height of a standard sign.
pub const MIN_SIGN_SIZE: u32 = 16;

/// Fixed height of a hanging sign's face.
pub const HANGING_HEIGHT: u32 = 16;

/// Depth of the face plane holding frames and content.
pub const FACE_PLANE: i64 = 15;

/// First depth slice of a hanging sign's backplate.
pub const BACKPLATE_START: i64 = 16;

/// Which side of the text the icon sits on for a hanging sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum IconPosition {
    #[default]
    Left,
    Right,
}

/// The three supported hanging sign widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub enum HangingWidth {
    W48,
    W64,
    W80,
}

impl HangingWidth {
    pub fn cells(self) -> u32 {
        match self {
            HangingWidth::W48 => 48,
            HangingWidth::W64 => 64,
            HangingWidth::W80 => 80,
        }
    }
}

impl TryFrom<u32> for HangingWidth {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            48 => Ok(HangingWidth::W48),
            64 => Ok(HangingWidth::W64),
            80 => Ok(HangingWidth::W80),
            other => Err(ValidationError::new(
                "hanging_width",
                format!("{other} is not one of 48, 64, 80"),
            )),
        }
    }
}

impl From<HangingWidth> for u32 {
    fn from(w: HangingWidth) -> u32 {
        w.cells()
    }
}

/// Dimensions of a flat wall sign.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardSign {
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub frame: bool,
    #[cfg_attr(feature = "serde", serde(default = "default_frame_width"))]
    pub frame_width: u32,
}

/// Dimensions of a hanging sign with a backplate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HangingSign {
    #[cfg_attr(feature = "serde", serde(rename = "hanging_width"))]
    pub width: HangingWidth,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon_position: IconPosition,
    #[cfg_attr(feature = "serde", serde(default = "default_thickness"))]
    pub thickness: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon_offset_x: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub text_offset_x: i32,
}

/// Sign variant; only the selected variant's dimensions are meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "lowercase")
)]
pub enum SignKind {
    Standard(StandardSign),
    Hanging(HangingSign),
}

/// Full input to sign generation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignSpec {
    pub sign: SignKind,
    /// Supplied separately from any config file.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub icon: Option<PixelBitmap>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,
    /// Icon scale in percent, applied when the icon is converted to a bitmap.
    #[cfg_attr(feature = "serde", serde(default = "default_icon_scale"))]
    pub icon_scale: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon_offset_y: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub text_offset_y: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub with_icon: bool,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

#[cfg(feature = "serde")]
fn default_frame_width() -> u32 {
    2
}

#[cfg(feature = "serde")]
fn default_thickness() -> u32 {
    2
}

#[cfg(feature = "serde")]
fn default_icon_scale() -> u32 {
    100
}

impl SignSpec {
    /// A framed standard sign with no content.
    pub fn standard(width: u32, height: u32) -> Self {
        SignSpec::with_kind(SignKind::Standard(StandardSign {
            width,
            height,
            frame: true,
            frame_width: 2,
        }))
    }

    /// A left-icon hanging sign with no content.
    pub fn hanging(width: HangingWidth, thickness: u32) -> Self {
        SignSpec::with_kind(SignKind::Hanging(HangingSign {
            width,
            icon_position: IconPosition::Left,
            thickness,
            icon_offset_x: 0,
            text_offset_x: 0,
        }))
    }

    fn with_kind(sign: SignKind) -> Self {
        SignSpec {
            sign,
            icon: None,
            text: String::new(),
            icon_scale: 100,
            icon_offset_y: 0,
            text_offset_y: 0,
            with_icon: true,
        }
    }

    /// Parse a specification from TOML. The icon is left unset.
    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<SignSpec, crate::error::SignError> {
        toml::from_str(toml_str).map_err(|e| crate::error::SignError::Config(e.to_string()))
    }

    /// Check the documented field constraints, reporting the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.sign {
            SignKind::Standard(s) => {
                if s.width < MIN_SIGN_SIZE {
                    return Err(ValidationError::new(
                        "width",
                        format!("{} is below the minimum of {MIN_SIGN_SIZE}", s.width),
                    ));
                }
                if s.height < MIN_SIGN_SIZE {
                    return Err(ValidationError::new(
                        "height",
                        format!("{} is below the minimum of {MIN_SIGN_SIZE}", s.height),
                    ));
                }
                if s.frame_width < 1 {
                    return Err(ValidationError::new("frame_width", "must be at least 1"));
                }
            }
            SignKind::Hanging(h) => {
                if h.thickness < 1 {
                    return Err(ValidationError::new("thickness", "must be at least 1"));
                }
            }
        }

        if self.icon_scale < 1 {
            return Err(ValidationError::new("icon_scale", "must be at least 1"));
        }

        if let Some(icon) = &self.icon {
            let expected = icon.width * icon.height;
            if icon.pixels.len() != expected {
                return Err(ValidationError::new(
                    "icon",
                    format!(
                        "pixel buffer length {} does not match {}x{} = {}",
                        icon.pixels.len(),
                        icon.width,
                        icon.height,
                        expected
                    ),
                ));
            }
        }

        Ok(())
    }

    pub fn is_hanging(&self) -> bool {
        matches!(self.sign, SignKind::Hanging(_))
    }

    /// Face width in cells.
    pub fn width(&self) -> u32 {
        match &self.sign {
            SignKind::Standard(s) => s.width,
            SignKind::Hanging(h) => h.width.cells(),
        }
    }

    /// Face height in cells.
    pub fn height(&self) -> u32 {
        match &self.sign {
            SignKind::Standard(s) => s.height,
            SignKind::Hanging(_) => HANGING_HEIGHT,
        }
    }

    /// Model depth: the face plane plus any backplate slices.
    pub fn depth(&self) -> u32 {
        match &self.sign {
            SignKind::Standard(_) => (FACE_PLANE + 1) as u32,
            SignKind::Hanging(h) => (BACKPLATE_START as u32).saturating_add(h.thickness),
        }
    }

    /// Interior padding between the sign edge and its content area.
    pub fn padding(&self) -> u32 {
        match &self.sign {
            SignKind::Standard(s) if s.frame => s.frame_width,
            SignKind::Standard(_) => 0,
            SignKind::Hanging(_) => 2,
        }
    }

    /// Human-readable description of the sign.
    pub fn label(&self) -> String {
        match &self.sign {
            SignKind::Standard(s) => format!("Standard sign {}x{}", s.width, s.height),
            SignKind::Hanging(h) => format!("Hanging sign {}x{HANGING_HEIGHT}", h.width.cells()),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod toml_tests {
    use super::*;

    #[test]
    fn parse_standard_with_defaults() {
        let spec = SignSpec::from_toml(
            r#"
            text = "HI"
            with_icon = false

            [sign]
            type = "standard"
            width = 48
            height = 40
            "#,
        )
        .unwrap();
        assert_eq!(spec.text, "HI");
        assert_eq!(spec.icon_scale, 100);
        assert_eq!(
            spec.sign,
            SignKind::Standard(StandardSign {
                width: 48,
                height: 40,
                frame: true,
                frame_width: 2,
            })
        );
    }

    #[test]
    fn parse_hanging() {
        let spec = SignSpec::from_toml(
            r#"
            text = "PATH"

            [sign]
            type = "hanging"
            hanging_width = 64
            icon_position = "right"
            thickness = 4
            "#,
        )
        .unwrap();
        match spec.sign {
            SignKind::Hanging(h) => {
                assert_eq!(h.width, HangingWidth::W64);
                assert_eq!(h.icon_position, IconPosition::Right);
                assert_eq!(h.thickness, 4);
            }
            other => panic!("expected hanging sign, got {other:?}"),
        }
        assert!(spec.with_icon);
    }

    #[test]
    fn reject_unsupported_hanging_width() {
        let err = SignSpec::from_toml(
            r#"
            [sign]
            type = "hanging"
            hanging_width = 50
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("hanging_width"), "{err}");
    }
}
