//! # 文件签名匹配模块
//!
//! 依据固定的魔数表推断一段字节的文件类型。匹配策略是首个命中
//! (first-match)：按表的声明顺序，第一个魔数是缓冲区前缀的条目胜出，
//! 不做最长匹配。因此表的顺序是语义的一部分。

use crate::constants::SNIFF_WINDOW;
use std::fs;
use std::io::Read;
use std::path::Path;

/// 签名表中的一个条目。
///
/// `label` 是面向用户展示的类型描述，`extension` 是为还原文件
/// 派生默认文件名时使用的规范扩展名 (不含点)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub magic: &'static [u8],
    pub label: &'static str,
    pub extension: &'static str,
}

/// 内建签名表。顺序即匹配优先级，修改顺序会改变分类结果。
pub const SIGNATURES: &[Signature] = &[
    Signature { magic: &[0x50, 0x4B, 0x03, 0x04], label: ".zip/.docx/.xlsx", extension: "zip" },
    Signature { magic: &[0x25, 0x50, 0x44, 0x46], label: ".pdf", extension: "pdf" },
    Signature { magic: &[0xFF, 0xD8, 0xFF], label: ".jpg", extension: "jpg" },
    Signature { magic: &[0x89, 0x50, 0x4E, 0x47], label: ".png", extension: "png" },
    Signature { magic: &[0x42, 0x4D], label: ".bmp", extension: "bmp" },
    Signature { magic: &[0x52, 0x61, 0x72, 0x21], label: ".rar", extension: "rar" },
    Signature { magic: &[0x7F, 0x45, 0x4C, 0x46], label: ".elf", extension: "elf" },
    Signature { magic: &[0x49, 0x44, 0x33], label: ".mp3", extension: "mp3" },
    Signature { magic: &[0x00, 0x00, 0x01, 0xBA], label: ".mpg", extension: "mpg" },
    Signature { magic: &[0x00, 0x00, 0x01, 0xB3], label: ".mpg", extension: "mpg" },
    Signature { magic: &[0x25, 0x21], label: ".ps", extension: "ps" },
    Signature { magic: &[0xD0, 0xCF, 0x11, 0xE0], label: ".doc/.xls/.ppt", extension: "doc" },
    Signature { magic: &[0x1F, 0x8B], label: ".gz", extension: "gz" },
];

/// 在内建签名表中分类一段字节，未命中返回 `None`。
pub fn classify(buffer: &[u8]) -> Option<&'static Signature> {
    classify_in(SIGNATURES, buffer)
}

/// 在调用方提供的签名表中分类一段字节。
///
/// 只检查缓冲区的前 [`SNIFF_WINDOW`] 个字节；缓冲区比某条魔数短时
/// 该条目自然无法命中。多个条目都能命中时，声明在前者胜出。
pub fn classify_in<'a>(table: &'a [Signature], buffer: &[u8]) -> Option<&'a Signature> {
    let head = &buffer[..buffer.len().min(SNIFF_WINDOW)];
    table.iter().find(|signature| head.starts_with(signature.magic))
}

/// 读取文件开头并在内建签名表中分类。
///
/// 读取失败 (`Err`) 与未命中 (`Ok(None)`) 是两种不同的结果，
/// 调用方必须能区分它们。
pub fn classify_file(path: &Path) -> std::io::Result<Option<&'static Signature>> {
    let file = fs::File::open(path)?;
    let mut head = Vec::with_capacity(SNIFF_WINDOW);
    file.take(SNIFF_WINDOW as u64).read_to_end(&mut head)?;
    Ok(classify(&head))
}
