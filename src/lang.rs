//! Operator-language detection and the fixed user-facing strings.
//!
//! The agent answers in the language the request was written in; the console
//! uses the same detection for its canned messages.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Cn,
}

/// CJK presence wins; everything else is treated as English.
pub fn detect(text: &str) -> Language {
    if text.chars().any(is_cjk) {
        Language::Cn
    } else {
        Language::En
    }
}

fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3000}'..='\u{303F}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FF00}'..='\u{FFEF}'
    )
}

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Cn => "Chinese",
        }
    }

    pub fn api_key_missing(&self) -> &'static str {
        match self {
            Language::En => "Error: API Key is missing. Please check your settings.",
            Language::Cn => "错误：API Key 缺失，请检查设置。",
        }
    }

    pub fn comm_error(&self) -> &'static str {
        match self {
            Language::En => {
                "I encountered an error communicating with the AI service. Please try again."
            }
            Language::Cn => "与 AI 服务通信时出错，请重试。",
        }
    }

    pub fn max_turns_reached(&self) -> &'static str {
        match self {
            Language::En => "Stopped: the maximum number of agent turns was reached.",
            Language::Cn => "已停止：达到智能代理的最大执行轮数。",
        }
    }

    pub fn welcome(&self) -> &'static str {
        match self {
            Language::En => {
                "Hello! I am your AI network agent. I can manage devices, scan subnets, and analyze logs. What shall I do?"
            }
            Language::Cn => "您好！我是您的智能运维代理。我可以帮您管理设备、扫描网络或分析日志。请下达指令。",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_chinese_and_defaults_to_english() {
        assert_eq!(detect("重启核心交换机"), Language::Cn);
        assert_eq!(detect("reboot the core switch"), Language::En);
        assert_eq!(detect("check 核心 switch"), Language::Cn);
        assert_eq!(detect(""), Language::En);
    }
}
