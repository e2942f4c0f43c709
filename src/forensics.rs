//! # 取证辅助模块
//!
//! 摘要计算、关键字扫描与 EXIF 元数据读取。
//! 这些功能是对顺序 I/O 的薄封装，与隐写核心相互独立。

use md5::Md5;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::BufReader;
use std::path::Path;

/// 一个文件的两种摘要，均为小写十六进制。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigests {
    pub md5: String,
    pub sha256: String,
}

/// 计算一段内容的 MD5 与 SHA256 摘要。
pub fn digests(content: &[u8]) -> FileDigests {
    let mut md5 = Md5::new();
    md5.update(content);

    let mut sha256 = Sha256::new();
    sha256.update(content);

    FileDigests {
        md5: hex::encode(md5.finalize()),
        sha256: hex::encode(sha256.finalize()),
    }
}

/// 在文本内容中做大小写不敏感的子串扫描，
/// 按传入顺序返回命中的关键字。空关键字直接跳过。
pub fn scan_keywords<'a>(content: &str, keywords: &'a [String]) -> Vec<&'a str> {
    let haystack = content.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| !keyword.is_empty() && haystack.contains(&keyword.to_lowercase()))
        .map(String::as_str)
        .collect()
}

/// 读取文件的 EXIF 元数据，返回 (标签, 值) 列表。
///
/// 容器内没有 EXIF 数据时返回空列表；
/// 文件无法读取或不是受支持的图像容器时返回错误。
pub fn read_exif(path: &Path) -> Result<Vec<(String, String)>, exif::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);

    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(data) => Ok(data
            .fields()
            .map(|field| {
                (
                    field.tag.to_string(),
                    field.display_value().with_unit(&data).to_string(),
                )
            })
            .collect()),
        Err(exif::Error::NotFound(_)) => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 验证摘要与公开测试向量一致
    #[test]
    fn test_digests_known_vectors() {
        let result = digests(b"abc");
        assert_eq!(result.md5, "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            result.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );

        let empty = digests(b"");
        assert_eq!(empty.md5, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            empty.sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    /// 验证关键字扫描大小写不敏感且保持传入顺序
    #[test]
    fn test_scan_keywords() {
        let content = "Amanda fue al parque con su hermano";
        let keywords = vec![
            "AMA".to_string(),
            "missing".to_string(),
            "Parque".to_string(),
            String::new(),
        ];

        assert_eq!(scan_keywords(content, &keywords), vec!["AMA", "Parque"]);
        assert!(scan_keywords("", &keywords).is_empty());
    }

    /// 验证手工构造的最小 TIFF 能解出 EXIF 字段
    #[test]
    fn test_read_exif_minimal_tiff() {
        // 小端 TIFF：单个 IFD，单条 ImageWidth = 800
        #[rustfmt::skip]
        let tiff: [u8; 26] = [
            0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, // II, 42, IFD @ 8
            0x01, 0x00,                                     // 1 个条目
            0x00, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, // ImageWidth, SHORT, count 1
            0x20, 0x03, 0x00, 0x00,                         // 值 800
            0x00, 0x00, 0x00, 0x00,                         // 无下一个 IFD
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minimal.tif");
        fs::write(&path, tiff).unwrap();

        let fields = read_exif(&path).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "ImageWidth");
        assert!(fields[0].1.contains("800"));
    }

    /// 验证没有 EXIF 的 PNG 返回空列表，纯文本返回错误
    #[test]
    fn test_read_exif_absent_and_invalid() {
        let dir = tempfile::tempdir().unwrap();

        let png_path = dir.path().join("plain.png");
        let cover = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
        cover.save(&png_path).unwrap();
        assert!(read_exif(&png_path).unwrap().is_empty());

        let text_path = dir.path().join("notes.txt");
        fs::write(&text_path, "no container here").unwrap();
        assert!(read_exif(&text_path).is_err());
    }
}
