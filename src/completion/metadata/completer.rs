//! 命令参数补全
//!
//! 根据命令树补全命令头之后的子命令、选项和文件名

use super::builtin::load_builtin_specs;
use super::command_spec::{find_spec, CommandSpec};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// 命令树中的一个补全位置
struct Level<'a> {
    words: &'a [CommandSpec],
    accepts_files: bool,
    after_file: &'a [CommandSpec],
}

impl<'a> Level<'a> {
    fn of(spec: &'a CommandSpec) -> Self {
        Self {
            words: &spec.subcommands,
            accepts_files: spec.accepts_files,
            after_file: &spec.after_file,
        }
    }

    /// 消费一个已输完的词，返回下一个位置
    fn advance(self, token: &str) -> Option<Level<'a>> {
        if let Some(next) = find_spec(self.words, token) {
            return Some(Level::of(next));
        }

        self.accepts_files.then(|| Level {
            words: self.after_file,
            accepts_files: false,
            after_file: &[],
        })
    }
}

/// 命令参数补全器
pub struct ArgumentCompleter {
    /// 已注册的命令
    specs: Vec<CommandSpec>,
    /// 是否显示隐藏文件
    show_hidden: bool,
}

impl ArgumentCompleter {
    /// 创建空的补全器
    pub fn new() -> Self {
        Self {
            specs: Vec::new(),
            show_hidden: false,
        }
    }

    /// 创建包含内置命令的补全器
    pub fn with_builtin_specs() -> Self {
        let mut completer = Self::new();
        for spec in load_builtin_specs() {
            completer.register(spec);
        }
        completer
    }

    /// 设置是否显示隐藏文件
    pub fn with_show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }

    /// 注册命令，同名命令会被替换
    pub fn register(&mut self, spec: CommandSpec) {
        match self
            .specs
            .iter_mut()
            .find(|existing| existing.name.eq_ignore_ascii_case(&spec.name))
        {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
    }

    /// 查找命令规范
    pub fn lookup(&self, command: &str) -> Option<&CommandSpec> {
        find_spec(&self.specs, command)
    }

    /// 已注册的命令数量
    pub fn count(&self) -> usize {
        self.specs.len()
    }

    /// 补全当前正在输入的词
    ///
    /// 只处理命令头之后的参数；命令头本身由建议引擎负责。
    /// 返回替换当前词的候选：先是固定词（按声明顺序），再是文件（按名称排序）。
    pub async fn complete(&self, line: &str, working_dir: &Path) -> Vec<String> {
        let (completed, current) = split_line(line);

        let Some((head, rest)) = completed.split_first() else {
            return Vec::new();
        };
        let Some(spec) = self.lookup(head) else {
            return Vec::new();
        };

        let mut level = Level::of(spec);
        for token in rest {
            match level.advance(token) {
                Some(next) => level = next,
                None => return Vec::new(),
            }
        }

        let needle = current.to_lowercase();
        let mut candidates: Vec<String> = level
            .words
            .iter()
            .filter(|word| word.name.to_lowercase().starts_with(&needle))
            .map(|word| word.name.clone())
            .collect();

        if level.accepts_files {
            candidates.extend(self.list_files(&current, working_dir).await);
        }

        candidates
    }

    /// 列出与当前词匹配的文件，目录追加 `/`
    async fn list_files(&self, current: &str, working_dir: &Path) -> Vec<String> {
        let (dir_part, name_prefix) = match current.rfind('/') {
            Some(index) => current.split_at(index + 1),
            None => ("", current),
        };

        let dir_path = resolve_dir(dir_part, working_dir);
        let mut entries = match fs::read_dir(&dir_path).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("读取目录失败 {}: {}", dir_path.display(), e);
                return Vec::new();
            }
        };

        let show_hidden = self.show_hidden || name_prefix.starts_with('.');
        let needle = name_prefix.to_lowercase();
        let mut names = Vec::new();

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("读取目录项失败 {}: {}", dir_path.display(), e);
                    break;
                }
            };

            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !show_hidden && file_name.starts_with('.') {
                continue;
            }
            if !file_name.to_lowercase().starts_with(&needle) {
                continue;
            }

            let is_dir = entry
                .file_type()
                .await
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false);

            let mut name = format!("{dir_part}{file_name}");
            if is_dir {
                name.push('/');
            }
            names.push(name);
        }

        names.sort();
        names
    }
}

impl Default for ArgumentCompleter {
    fn default() -> Self {
        Self::with_builtin_specs()
    }
}

/// 拆分输入行：已输完的词 + 正在输入的词
///
/// 引号不配对时退回按空白拆分。
fn split_line(line: &str) -> (Vec<String>, String) {
    let mut tokens = shell_words::split(line).unwrap_or_else(|e| {
        debug!("按 shell 规则拆分失败，退回空白拆分: {}", e);
        line.split_whitespace().map(str::to_string).collect()
    });

    if line.is_empty() || line.ends_with(char::is_whitespace) {
        return (tokens, String::new());
    }

    let current = tokens.pop().unwrap_or_default();
    (tokens, current)
}

/// 解析目录部分，相对路径基于工作目录
fn resolve_dir(dir_part: &str, working_dir: &Path) -> PathBuf {
    if dir_part.is_empty() {
        return working_dir.to_path_buf();
    }

    let path = Path::new(dir_part);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    }
}
