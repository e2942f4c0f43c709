//! # 核心错误类型模块
//!
//! 定义隐写核心 (比特流编解码与像素载体) 的类型化错误。
//! I/O 错误不在此枚举中：文件读写失败由 `handler` 层通过 `anyhow` 携带上下文向上传播。

use thiserror::Error;

/// 隐写核心可能产生的错误。
///
/// 嵌入前的所有校验错误都在修改任何像素之前返回，
/// 因此失败的嵌入操作不会产生部分写入的输出。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 载体容量不足：帧化后的比特长度超过了封面图像的可用容量。
    #[error(
        "The cover image cannot hold the framed payload. \nRequired: {needed} bits, Available: {capacity} bits."
    )]
    CoverTooSmall { needed: u64, capacity: u64 },

    /// 载荷过大：长度无法写入 4 字节的长度前缀。
    #[error("The payload is {0} bytes, which does not fit the 32-bit length field.")]
    PayloadTooLarge(usize),
}
