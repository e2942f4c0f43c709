//! # 比特流编解码模块
//!
//! 负责载荷的帧化与比特展开：帧 = 4 字节大端序 `u32` 长度前缀 + 载荷本体，
//! 再按字节顺序、字节内高位在前 (MSB first) 展开为单个比特的序列。
//! 本模块是纯函数集合，不做任何 I/O。

use crate::constants::LENGTH_PREFIX_BYTES;
use crate::error::StegoError;

/// 从比特序列中还原出的载荷。
///
/// `declared_len` 是嵌入时写入的长度前缀原始值；当比特序列被截断时
/// `data.len()` 可能小于它，调用方可借此判断还原是否完整。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredPayload {
    pub data: Vec<u8>,
    pub declared_len: u32,
}

/// 将载荷帧化并展开为比特序列。
///
/// 输出长度恒为 `8 * (payload.len() + 4)`，必然是 8 的倍数。
///
/// # Errors
///
/// 载荷长度超过 2^32 - 1 字节、无法写入 4 字节长度前缀时，
/// 返回 [`StegoError::PayloadTooLarge`]。
pub fn serialize(payload: &[u8]) -> Result<Vec<u8>, StegoError> {
    let declared = u32::try_from(payload.len())
        .map_err(|_| StegoError::PayloadTooLarge(payload.len()))?;

    let mut framed = Vec::with_capacity(LENGTH_PREFIX_BYTES + payload.len());
    framed.extend_from_slice(&declared.to_be_bytes());
    framed.extend_from_slice(payload);

    Ok(bytes_to_bits(&framed))
}

/// 从比特序列中解出长度前缀与载荷。
///
/// 本函数从不失败，截断行为定义如下：
/// * 前 32 个比特按大端序解释为长度 `L`；若序列不足 32 比特，
///   则把现有的比特右对齐解释为长度 (不足的高位视为 0)。
/// * 随后最多读取 `L * 8` 个比特、按高位在前组装成字节；
///   比特不足时载荷静默截断为现有比特，末尾不完整的字节低位补 0。
/// * 超出 `32 + L * 8` 的比特是载体的容量余量，全部忽略。
///
/// 长度前缀是唯一的真值来源：若图像从未嵌入过数据，这里仍会按
/// 其像素噪声"还原"出一段无意义的字节，而不会报错。
pub fn deserialize(bits: &[u8]) -> RecoveredPayload {
    let header_len = bits.len().min(LENGTH_PREFIX_BYTES * 8);
    let declared_len = bits[..header_len]
        .iter()
        .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit & 1));

    let body = &bits[header_len..];
    let wanted = u64::from(declared_len) * 8;
    let take = wanted.min(body.len() as u64) as usize;

    RecoveredPayload {
        data: bits_to_bytes(&body[..take]),
        declared_len,
    }
}

/// 将字节序列展开为比特序列，字节内高位在前。
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// 将比特序列 (高位在前) 组装回字节序列。
/// 长度不是 8 的倍数时，末尾不完整的字节低位补 0。
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}
