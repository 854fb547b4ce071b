use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Language of the default log messages
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum MessageLanguage {
    #[default]
    #[strum(to_string = "zh", serialize = "zh-CN", serialize = "chinese")]
    #[serde(rename = "zh", alias = "zh-CN")]
    Chinese,

    #[strum(to_string = "en", serialize = "en-US", serialize = "english")]
    #[serde(rename = "en", alias = "en-US")]
    English,
}

impl MessageLanguage {
    /// The configured processor is a trait or abstract type
    pub fn processor_not_concrete(self, tag: &str, processor: &str) -> String {
        match self {
            Self::Chinese => format!(
                "{} 需要指定具体的切面处理器，因为 {} 是接口或者抽象类",
                tag, processor
            ),
            Self::English => format!(
                "{} requires a concrete aspect processor because {} is an interface or abstract type",
                tag, processor
            ),
        }
    }

    /// The processor rejected the method or is missing from the registry
    pub fn not_handled(self, tag: &str, processor: &str) -> String {
        match self {
            Self::Chinese => format!(
                "{} 不是 {} 可以处理的方法，或者 {} 在切面处理器注册表中不存在",
                tag, processor, processor
            ),
            Self::English => format!(
                "{} is not a method {} can handle, or {} is not registered in the processor registry",
                tag, processor, processor
            ),
        }
    }

    /// The method carries no processor at all
    pub fn no_processor(self, tag: &str) -> String {
        match self {
            Self::Chinese => format!("{} 没有指定切面处理器", tag),
            Self::English => format!("{} has no aspect processor configured", tag),
        }
    }

    pub fn failed(self, tag: &str) -> String {
        match self {
            Self::Chinese => format!("{} 执行时出错", tag),
            Self::English => format!("{} failed during execution", tag),
        }
    }
}
