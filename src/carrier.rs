//! # 像素载体模块
//!
//! 把封面图像的像素网格暴露为一个扁平的比特地址空间：
//! 按行优先顺序遍历像素，每个像素内再按约定的通道顺序访问 R、G、B
//! 的最低有效位。写入与读取共享同一个 [`ChannelOrder`] 契约，
//! 两侧顺序不一致时提取结果只会是噪声，不会报错。
//!
//! Alpha 通道不参与承载，容量只按 RGB 三通道计算。

use crate::constants::CARRIER_CHANNELS;
use crate::error::StegoError;
use image::RgbaImage;

/// 像素内通道的遍历顺序，是写入方与读取方必须共享的契约。
///
/// 像素本身始终按行优先 (自上而下、自左向右) 遍历；
/// 本类型只约定单个像素内三个颜色通道的访问次序。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOrder([usize; 3]);

impl ChannelOrder {
    /// 红、绿、蓝。命令行工具固定使用这一顺序。
    pub const RGB: Self = Self([0, 1, 2]);

    /// 蓝、绿、红。与 [`ChannelOrder::RGB`] 互不兼容，供测试验证顺序敏感性。
    pub const BGR: Self = Self([2, 1, 0]);

    /// 由三个通道下标构造遍历顺序。
    /// 必须是 0、1、2 的一个排列，否则返回 `None`。
    pub fn new(first: usize, second: usize, third: usize) -> Option<Self> {
        let order = [first, second, third];
        let mut seen = [false; CARRIER_CHANNELS];
        for &idx in &order {
            if idx >= CARRIER_CHANNELS || seen[idx] {
                return None;
            }
            seen[idx] = true;
        }
        Some(Self(order))
    }

    fn indices(self) -> [usize; 3] {
        self.0
    }
}

impl Default for ChannelOrder {
    fn default() -> Self {
        Self::RGB
    }
}

/// 返回图像可承载的比特数：`3 × 像素总数`。
pub fn capacity_bits(image: &RgbaImage) -> u64 {
    let (width, height) = image.dimensions();
    u64::from(width) * u64::from(height) * CARRIER_CHANNELS as u64
}

/// 把比特序列写入封面图像的通道最低位，返回新的隐写图像。
///
/// 传入的封面只被借用，永远不会被原地修改。比特耗尽后，
/// 剩余通道 (以及所有像素的 Alpha 通道) 原样保留。
///
/// # Errors
///
/// 比特数超过 [`capacity_bits`] 时返回 [`StegoError::CoverTooSmall`]，
/// 此时没有任何像素被修改过。
pub fn write_bits(
    cover: &RgbaImage,
    bits: &[u8],
    order: ChannelOrder,
) -> Result<RgbaImage, StegoError> {
    let capacity = capacity_bits(cover);
    if bits.len() as u64 > capacity {
        return Err(StegoError::CoverTooSmall {
            needed: bits.len() as u64,
            capacity,
        });
    }

    let mut stego = cover.clone();
    let mut stream = bits.iter();

    'pixels: for pixel in stego.pixels_mut() {
        for channel in order.indices() {
            match stream.next() {
                Some(&bit) => pixel.0[channel] = (pixel.0[channel] & !1) | (bit & 1),
                None => break 'pixels,
            }
        }
    }

    Ok(stego)
}

/// 读出图像全部通道的最低位，恒为 `3 × 像素总数` 个比特。
///
/// 本函数不知道哪些比特有意义：有效长度由比特流编解码层
/// 从嵌入的长度前缀中解出。
pub fn read_bits(image: &RgbaImage, order: ChannelOrder) -> Vec<u8> {
    let mut bits = Vec::with_capacity(capacity_bits(image) as usize);
    for pixel in image.pixels() {
        for channel in order.indices() {
            bits.push(pixel.0[channel] & 1);
        }
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream;
    use image::{ImageBuffer, Rgba};

    /// 构造一个通道值确定的测试封面
    fn test_cover(width: u32, height: u32) -> RgbaImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([
                ((x * 17 + y) % 256) as u8,
                ((y * 23 + x) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
                ((x * 7 + y * 11) % 256) as u8,
            ])
        })
    }

    /// 验证容量为像素数的三倍
    #[test]
    fn test_capacity() {
        assert_eq!(capacity_bits(&test_cover(10, 10)), 300);
        assert_eq!(capacity_bits(&test_cover(2, 2)), 12);
        assert_eq!(capacity_bits(&test_cover(1, 1)), 3);
    }

    /// 验证写入的比特能按同一顺序逐位读回
    #[test]
    fn test_write_read_bits_roundtrip() {
        let cover = test_cover(8, 8);
        let bits: Vec<u8> = (0..50).map(|i| ((i * 5 + 1) % 3 == 0) as u8).collect();

        let stego = write_bits(&cover, &bits, ChannelOrder::RGB).unwrap();
        let read = read_bits(&stego, ChannelOrder::RGB);

        assert_eq!(read.len(), 192);
        assert_eq!(&read[..bits.len()], bits.as_slice());
    }

    /// 验证比特耗尽后剩余通道原样保留
    #[test]
    fn test_untouched_channels_pass_through() {
        let cover = test_cover(4, 4);
        let bits = [1u8, 0, 1, 1, 0];

        let stego = write_bits(&cover, &bits, ChannelOrder::RGB).unwrap();

        // 前 5 个通道槽位之外的所有通道必须与封面一致
        let mut slot = 0usize;
        for (original, written) in cover.pixels().zip(stego.pixels()) {
            for channel in 0..3 {
                if slot >= bits.len() {
                    assert_eq!(original.0[channel], written.0[channel]);
                }
                slot += 1;
            }
        }
    }

    /// 验证 Alpha 不被触碰、RGB 通道最多只变动最低位
    #[test]
    fn test_channel_isolation() {
        let cover = test_cover(6, 6);
        let capacity = capacity_bits(&cover) as usize;
        let bits: Vec<u8> = (0..capacity).map(|i| (i % 2) as u8).collect();

        let stego = write_bits(&cover, &bits, ChannelOrder::RGB).unwrap();

        for (original, written) in cover.pixels().zip(stego.pixels()) {
            assert_eq!(original.0[3], written.0[3], "alpha must never change");
            for channel in 0..3 {
                let delta = i16::from(original.0[channel]) - i16::from(written.0[channel]);
                assert!(delta.abs() <= 1, "channel may only change in its LSB");
            }
        }
    }

    /// 验证容量边界：恰好填满成功，多一比特失败且封面不变
    #[test]
    fn test_capacity_boundary() {
        let cover = test_cover(2, 2);
        let exact = vec![1u8; 12];
        assert!(write_bits(&cover, &exact, ChannelOrder::RGB).is_ok());

        let snapshot = cover.clone();
        let over = vec![1u8; 13];
        let result = write_bits(&cover, &over, ChannelOrder::RGB);
        assert_eq!(
            result.unwrap_err(),
            StegoError::CoverTooSmall {
                needed: 13,
                capacity: 12
            }
        );
        assert_eq!(cover, snapshot, "failed write must not touch the cover");
    }

    /// 验证读取顺序与写入顺序不一致时结果不匹配
    #[test]
    fn test_order_sensitivity() {
        let cover = test_cover(8, 8);
        let bits: Vec<u8> = [1u8, 0, 0].repeat(20);

        let stego = write_bits(&cover, &bits, ChannelOrder::RGB).unwrap();
        let mismatched = read_bits(&stego, ChannelOrder::BGR);

        assert_ne!(&mismatched[..bits.len()], bits.as_slice());
    }

    /// 验证自定义顺序必须是通道下标的排列
    #[test]
    fn test_channel_order_validation() {
        assert_eq!(ChannelOrder::new(2, 1, 0), Some(ChannelOrder::BGR));
        assert_eq!(ChannelOrder::new(0, 1, 2), Some(ChannelOrder::RGB));
        assert_eq!(ChannelOrder::new(0, 0, 1), None);
        assert_eq!(ChannelOrder::new(0, 1, 3), None);
    }

    /// 验证帧化后的载荷：恰好填满的封面成功往返，装不下的微型封面报容量错误
    #[test]
    fn test_framed_payload_capacity_scenarios() {
        // 4x4 封面 48 比特，2 字节载荷帧化后恰为 48 比特
        let cover = test_cover(4, 4);
        let payload = [0x5A, 0xA5];
        let bits = bitstream::serialize(&payload).unwrap();
        assert_eq!(bits.len() as u64, capacity_bits(&cover));

        let stego = write_bits(&cover, &bits, ChannelOrder::RGB).unwrap();
        let recovered = bitstream::deserialize(&read_bits(&stego, ChannelOrder::RGB));
        assert_eq!(recovered.data, payload);

        // 2x2 封面只有 12 比特，连 1 字节载荷的 40 比特帧都装不下
        let tiny = test_cover(2, 2);
        let snapshot = tiny.clone();
        let bits = bitstream::serialize(&[0x42]).unwrap();
        assert_eq!(
            write_bits(&tiny, &bits, ChannelOrder::RGB).unwrap_err(),
            StegoError::CoverTooSmall {
                needed: 40,
                capacity: 12
            }
        );
        assert_eq!(tiny, snapshot);
    }

    /// 验证帧化 + 嵌入 + 读出 + 解帧的完整往返 (10x10 封面、10 字节载荷)
    #[test]
    fn test_embed_recover_pipeline() {
        let cover = test_cover(10, 10);
        let payload = b"0123456789";

        let bits = bitstream::serialize(payload).unwrap();
        assert_eq!(bits.len(), 112);
        assert!(bits.len() as u64 <= capacity_bits(&cover));

        let stego = write_bits(&cover, &bits, ChannelOrder::default()).unwrap();
        let recovered = bitstream::deserialize(&read_bits(&stego, ChannelOrder::default()));

        assert_eq!(recovered.declared_len, 10);
        assert_eq!(recovered.data, payload);
    }

    /// 验证零长度载荷也能完整往返
    #[test]
    fn test_embed_recover_empty_payload() {
        let cover = test_cover(4, 3);
        let bits = bitstream::serialize(&[]).unwrap();

        let stego = write_bits(&cover, &bits, ChannelOrder::default()).unwrap();
        let recovered = bitstream::deserialize(&read_bits(&stego, ChannelOrder::default()));

        assert_eq!(recovered.declared_len, 0);
        assert!(recovered.data.is_empty());
    }
}
