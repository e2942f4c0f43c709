/// 帧长度前缀占用的字节数。
/// 帧格式为 4 字节大端序 `u32` 长度 + 载荷本体，
/// 因此单个载荷最大为 2^32 - 1 字节。
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// 每个像素可用作载体的颜色通道数。
/// 仅使用 R、G、B 三个通道的最低有效位，每像素承载 3 bits；
/// Alpha 通道既不读取也不写入。
pub const CARRIER_CHANNELS: usize = 3;

/// 类型嗅探时读取的文件头窗口大小 (字节)。
/// 签名表中最长的魔数为 4 字节，8 字节窗口足以匹配全部条目。
pub const SNIFF_WINDOW: usize = 8;
