//! 命令词汇表
//!
//! 内置命令与配置中允许的命令取并集，作为模糊匹配的静态候选

use std::collections::HashSet;

/// 内置命令
pub const BUILTIN_COMMANDS: &[&str] = &[
    "mode",
    "login",
    "say",
    "hello",
    "bye",
    "setprompt",
    "clear",
    "exit",
    "setpassword",
    "help",
    "go",
    "sleep",
];

/// 去重后的命令词汇表
///
/// 顺序稳定：先内置命令，再按配置顺序追加允许的命令。
/// 命令可以包含参数（如 `go build -v`），不做语法校验。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularySource {
    commands: Vec<String>,
}

impl VocabularySource {
    /// 合并内置命令与允许的命令
    pub fn collect<B, A, S, T>(builtins: B, allowed: A) -> Self
    where
        B: IntoIterator<Item = S>,
        A: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut commands = Vec::new();

        let builtins = builtins.into_iter().map(|c| c.as_ref().trim().to_string());
        let allowed = allowed.into_iter().map(|c| c.as_ref().trim().to_string());

        for command in builtins.chain(allowed) {
            if command.is_empty() {
                continue;
            }
            if seen.insert(command.clone()) {
                commands.push(command);
            }
        }

        Self { commands }
    }

    /// 内置命令加上给定的允许列表
    pub fn with_allowed<A, T>(allowed: A) -> Self
    where
        A: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self::collect(BUILTIN_COMMANDS.iter().copied(), allowed)
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().map(String::as_str)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands.iter().any(|c| c == command)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
