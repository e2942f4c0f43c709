use clap::Parser;

use lsb_stash::{
    cli::{Cli, Commands},
    handler::{
        handle_exif, handle_hash, handle_hide, handle_recover, handle_search, handle_sniff,
    },
};

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Hide(args) => handle_hide(args),
        Commands::Recover(args) => handle_recover(args),
        Commands::Sniff(args) => handle_sniff(args),
        Commands::Hash(args) => handle_hash(args),
        Commands::Exif(args) => handle_exif(args),
        Commands::Search(args) => handle_search(args),
    }
}
