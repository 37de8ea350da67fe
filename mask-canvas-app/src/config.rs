use std::{io, path::PathBuf};

use mask_canvas::CanvasSettings;

use crate::AppError;

#[derive(serde::Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// Initial window size.
    pub viewport: [f32; 2],
    pub source: Option<PathBuf>,
    pub mask: Option<PathBuf>,
    pub output: PathBuf,
    pub canvas: CanvasSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: [800.0, 600.0],
            source: None,
            mask: None,
            output: "masked.png".into(),
            canvas: CanvasSettings::default(),
        }
    }
}

impl Config {
    /// Read `path` if it exists, defaults otherwise.
    pub fn load(path: &str) -> Result<Self, AppError> {
        match std::fs::File::open(path) {
            Ok(f) => Ok(serde_json::from_reader(io::BufReader::new(f))?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Positional `source [mask] [output]` arguments win over the file.
    pub fn apply_args(&mut self, mut args: impl Iterator<Item = String>) {
        if let Some(source) = args.next() {
            self.source = Some(source.into());
        }
        if let Some(mask) = args.next() {
            self.mask = Some(mask.into());
        }
        if let Some(output) = args.next() {
            self.output = output.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use mask_canvas::TrimMode;

    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"source": "a.png", "canvas": {"trim_mode": "Inclusive"}}"#)
                .unwrap();
        assert_eq!(config.source, Some(PathBuf::from("a.png")));
        assert_eq!(config.output, PathBuf::from("masked.png"));
        assert_eq!(config.canvas.trim_mode, TrimMode::Inclusive);
        assert_eq!(config.canvas.stroke_width, 20.0);
    }

    #[test]
    fn args_override_file() {
        let mut config = Config {
            mask: Some("old_mask.png".into()),
            ..Default::default()
        };
        config.apply_args(["photo.jpg".to_string()].into_iter());
        assert_eq!(config.source, Some(PathBuf::from("photo.jpg")));
        assert_eq!(config.mask, Some(PathBuf::from("old_mask.png")));

        config.apply_args(["a.png", "b.png", "c.png"].map(String::from).into_iter());
        assert_eq!(config.mask, Some(PathBuf::from("b.png")));
        assert_eq!(config.output, PathBuf::from("c.png"));
    }
}
