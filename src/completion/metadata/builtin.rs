//! 内置命令定义
//!
//! 内置命令的参数树

use super::command_spec::CommandSpec;

/// 加载所有内置命令规范
pub fn load_builtin_specs() -> Vec<CommandSpec> {
    vec![mode_command(), say_command(), go_command()]
}

/// 编辑模式切换
fn mode_command() -> CommandSpec {
    CommandSpec::new("mode")
        .with_words(["vi", "emacs"])
        .with_description("Switch line editing mode")
}

/// `say <file> with following|items`
fn say_command() -> CommandSpec {
    CommandSpec::new("say")
        .with_after_file(CommandSpec::new("with").with_words(["following", "items"]))
        .with_description("Print text or file names")
}

/// Go 工具链常用子命令
fn go_command() -> CommandSpec {
    CommandSpec::new("go")
        .with_subcommand(CommandSpec::new("build").with_words(["-o", "-v"]))
        .with_subcommand(CommandSpec::new("install").with_words(["-v", "-vv", "-vvv"]))
        .with_subcommand(CommandSpec::new("test"))
        .with_description("Go toolchain")
}
