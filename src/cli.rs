//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或还原任意文件，并附带签名嗅探、摘要与 EXIF 等取证辅助命令。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或还原任意文件，并附带签名嗅探、摘要与 EXIF 等取证辅助命令。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中隐藏任意文件。
    Hide(HideArgs),

    /// 从经过隐写的图像中还原隐藏的文件，并按魔数签名推断其类型。
    Recover(RecoverArgs),

    /// 按魔数签名推断文件的真实类型。
    Sniff(SniffArgs),

    /// 计算文件的 MD5 与 SHA256 摘要。
    Hash(HashArgs),

    /// 读取并打印图像文件的 EXIF 元数据。
    Exif(ExifArgs),

    /// 在文本文件中做大小写不敏感的关键字扫描。
    Search(SearchArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用作载体的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径。
    #[arg(short, long)]
    pub file: PathBuf,

    /// 隐写完成后，保存结果图像的输出路径。默认在原图像名前加 "doctored_" 前缀。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时直接覆盖。
    #[arg(long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 还原文件的输出路径。默认写为 "recovered_<图像名>.<推断扩展名>"。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出文件已存在时直接覆盖。
    #[arg(long)]
    pub force: bool,
}

/// 'sniff' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct SniffArgs {
    /// 要嗅探的文件路径。
    #[arg(short, long)]
    pub file: PathBuf,
}

/// 'hash' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HashArgs {
    /// 要计算摘要的文件路径。
    #[arg(short, long)]
    pub file: PathBuf,
}

/// 'exif' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExifArgs {
    /// 要读取元数据的图像文件路径。
    #[arg(short, long)]
    pub file: PathBuf,
}

/// 'search' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// 要扫描的文本文件路径。
    #[arg(short, long)]
    pub file: PathBuf,

    /// 要查找的关键字，逗号分隔。
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub keywords: Vec<String>,
}
