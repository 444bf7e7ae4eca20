//! 命令规范定义
//!
//! 描述一个命令（或子命令）之后可以出现的内容

use serde::{Deserialize, Serialize};

/// 命令规范
///
/// 一棵命令树：`subcommands` 是固定的下一级词，
/// `accepts_files` 表示这一级可以接受一个文件参数，文件之后继续补全 `after_file`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// 命令或子命令名称
    pub name: String,

    /// 下一级的固定词（子命令或选项）
    #[serde(default)]
    pub subcommands: Vec<CommandSpec>,

    /// 是否接受文件作为参数
    #[serde(default)]
    pub accepts_files: bool,

    /// 文件参数之后可以出现的词
    #[serde(default)]
    pub after_file: Vec<CommandSpec>,

    /// 命令描述
    pub description: Option<String>,
}

impl CommandSpec {
    /// 创建新的命令规范
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subcommands: Vec::new(),
            accepts_files: false,
            after_file: Vec::new(),
            description: None,
        }
    }

    /// 添加子命令
    pub fn with_subcommand(mut self, subcommand: CommandSpec) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    /// 批量添加不再有下一级的子命令或选项
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcommands
            .extend(words.into_iter().map(CommandSpec::new));
        self
    }

    /// 设置接受文件参数
    pub fn with_files(mut self) -> Self {
        self.accepts_files = true;
        self
    }

    /// 设置文件参数之后的词
    pub fn with_after_file(mut self, spec: CommandSpec) -> Self {
        self.accepts_files = true;
        self.after_file.push(spec);
        self
    }

    /// 设置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 按名称查找下一级（忽略大小写）
    pub fn find_subcommand(&self, name: &str) -> Option<&CommandSpec> {
        find_spec(&self.subcommands, name)
    }
}

/// 在一组规范中按名称查找（忽略大小写）
pub(crate) fn find_spec<'a>(specs: &'a [CommandSpec], name: &str) -> Option<&'a CommandSpec> {
    specs.iter().find(|spec| spec.name.eq_ignore_ascii_case(name))
}
