use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One declared capability argument and its width in bytes.
pub struct ArgSpec {
    pub name: String,
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A firmware output function as resolved by the front-end.
pub struct Capability {
    pub name: String,
    /// Firmware symbol printed in the capability list; defaults to `name`.
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub args: Vec<ArgSpec>,
}

impl Capability {
    pub fn new(name: impl Into<String>, function: impl Into<String>, args: Vec<ArgSpec>) -> Self {
        Self {
            name: name.into(),
            function: Some(function.into()),
            args,
        }
    }

    pub fn function(&self) -> &str {
        self.function.as_deref().unwrap_or(&self.name)
    }

    /// Total number of argument bytes the firmware reads after the index.
    pub fn arg_byte_width(&self) -> usize {
        self.args.iter().map(|arg| arg.width).sum()
    }
}

/// Control-output classes the encoder references directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequiredCapability {
    Cons,
    None,
    Sys,
    Usb,
}

impl RequiredCapability {
    pub const ALL: [RequiredCapability; 4] = [
        RequiredCapability::Cons,
        RequiredCapability::None,
        RequiredCapability::Sys,
        RequiredCapability::Usb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredCapability::Cons => "CONS",
            RequiredCapability::None => "NONE",
            RequiredCapability::Sys => "SYS",
            RequiredCapability::Usb => "USB",
        }
    }

    /// Capability name the kiibohd firmware registers for this class.
    pub fn default_name(&self) -> &'static str {
        match self {
            RequiredCapability::Cons => "consCtrlOut",
            RequiredCapability::None => "noneOut",
            RequiredCapability::Sys => "sysCtrlOut",
            RequiredCapability::Usb => "usbKeyOut",
        }
    }
}
