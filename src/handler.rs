//! # 命令处理逻辑模块
//!
//! 包含处理各子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写与取证函数以及向用户报告结果。

use crate::bitstream;
use crate::carrier::{self, ChannelOrder};
use crate::cli::{ExifArgs, HashArgs, HideArgs, RecoverArgs, SearchArgs, SniffArgs};
use crate::forensics;
use crate::signature::{self, Signature};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像和待藏文件、检查隐写空间是否足够、将带长度前缀的位流
/// 写入像素通道，最后将结果图像保存到目标路径。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的载体图像。
/// * 无法读取要隐藏的文件。
/// * 文件超过 32 位长度字段的上限。
/// * 图像没有足够的空间容纳成帧后的位流。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let cover = image::open(&args.image)
        .with_context(|| {
            format!(
                "Unable to read cover image: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .to_rgba8();

    let payload = fs::read(&args.file).with_context(|| {
        format!(
            "Unable to read payload file: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;

    let bits = bitstream::serialize(&payload).with_context(|| {
        format!(
            "Failed to frame the payload file: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;

    let required_space = bits.len() as u64;
    let available_space = carrier::capacity_bits(&cover);

    anyhow::ensure!(
        available_space >= required_space,
        "Not enough space in the image to hide the file. \nRequired: {} bits, Available: {} bits",
        required_space.to_string().red().bold(),
        available_space.to_string().green().bold()
    );

    let dest = args
        .dest
        .unwrap_or_else(|| default_hide_dest(&args.image));
    ensure_writable(&dest, args.force)?;

    let doctored = carrier::write_bits(&cover, &bits, ChannelOrder::default())
        .context("Failed to embed the payload into the cover image.")?;

    doctored.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The file has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、从像素通道读出位流并还原出字节内容，
/// 按魔数签名推断文件类型，最后将还原的内容写入目标文件。
///
/// 还原过程完全信任长度前缀：图像未经隐写或已被有损处理时，
/// 产物通常是签名无法识别的乱码字节，不会单独报错。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法写入到目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let doctored = image::open(&args.image)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .to_rgba8();

    let bits = carrier::read_bits(&doctored, ChannelOrder::default());
    let recovered = bitstream::deserialize(&bits);
    let detected = signature::classify(&recovered.data);

    let output = match args.output {
        Some(path) => path,
        None => default_recover_output(&args.image, detected),
    };
    ensure_writable(&output, args.force)?;

    fs::write(&output, &recovered.data).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    print_detected(detected);
    println!(
        "The file has been successfully recovered and saved: {}",
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Sniff' 命令：读取文件开头并按魔数签名推断类型。
///
/// # Errors
///
/// 文件无法读取时返回错误；签名未命中不是错误，会打印 "unknown"。
pub fn handle_sniff(args: SniffArgs) -> Result<()> {
    let detected = signature::classify_file(&args.file).with_context(|| {
        format!(
            "Unable to read file: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;

    print_detected(detected);
    Ok(())
}

/// 处理 'Hash' 命令：计算并打印文件的 MD5 与 SHA256 摘要。
pub fn handle_hash(args: HashArgs) -> Result<()> {
    let content = fs::read(&args.file).with_context(|| {
        format!(
            "Unable to read file: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;

    let digests = forensics::digests(&content);

    println!("Hashes for: {}", args.file.to_string_lossy().green().bold());
    println!("MD5:    {}", digests.md5);
    println!("SHA256: {}", digests.sha256);
    Ok(())
}

/// 处理 'Exif' 命令：读取并打印图像文件的 EXIF 元数据。
pub fn handle_exif(args: ExifArgs) -> Result<()> {
    let fields = forensics::read_exif(&args.file).with_context(|| {
        format!(
            "Unable to read EXIF metadata from: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;

    if fields.is_empty() {
        println!(
            "No EXIF metadata found in: {}",
            args.file.to_string_lossy().yellow().bold()
        );
        return Ok(());
    }

    println!("Metadata for: {}", args.file.to_string_lossy().green().bold());
    for (tag, value) in &fields {
        println!("{tag}: {value}");
    }
    Ok(())
}

/// 处理 'Search' 命令：在文本文件中做大小写不敏感的关键字扫描。
pub fn handle_search(args: SearchArgs) -> Result<()> {
    let raw = fs::read(&args.file).with_context(|| {
        format!(
            "Unable to read file: {}",
            args.file.to_string_lossy().red().bold()
        )
    })?;
    let content = String::from_utf8_lossy(&raw);

    let found = forensics::scan_keywords(&content, &args.keywords);
    if found.is_empty() {
        println!(
            "No keywords found in: {}",
            args.file.to_string_lossy().yellow().bold()
        );
        return Ok(());
    }

    for keyword in found {
        println!("Found keyword: {}", keyword.green().bold());
    }
    Ok(())
}

/// 打印签名匹配结果，未命中时打印 "unknown"。
fn print_detected(detected: Option<&Signature>) {
    match detected {
        Some(signature) => println!("Detected file type: {}", signature.label.cyan().bold()),
        None => println!("Detected file type: {}", "unknown".yellow().bold()),
    }
}

/// 未指定输出路径时，在原图像名前加 "doctored_" 前缀。
fn default_hide_dest(image: &Path) -> PathBuf {
    match image.file_name() {
        Some(name) => image.with_file_name(format!("doctored_{}", name.to_string_lossy())),
        None => PathBuf::from("doctored_output.png"),
    }
}

/// 未指定输出路径时，按 "recovered_<图像名>.<推断扩展名>" 生成，
/// 签名未命中时扩展名用 "bin"。
fn default_recover_output(image: &Path, detected: Option<&Signature>) -> PathBuf {
    let extension = detected.map_or("bin", |signature| signature.extension);
    match image.file_stem() {
        Some(stem) => {
            image.with_file_name(format!("recovered_{}.{extension}", stem.to_string_lossy()))
        }
        None => PathBuf::from(format!("recovered_output.{extension}")),
    }
}

/// 输出文件已存在且未指定 `--force` 时拒绝写入。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nPass --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}
