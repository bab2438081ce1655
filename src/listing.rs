//! 反汇编清单输出
//!
//! 每行形如 `[<addr>: ][<raw>  ]<mnemonic>`，前缀由 [`ListingConfig`] 决定。

use crate::isa::{decode, format};

/// 清单配置
///
/// # 示例
///
/// ```
/// use rv32i_disasm::listing::{Listing, ListingConfig};
///
/// let listing = Listing::new(ListingConfig::default().with_address(true));
/// assert_eq!(listing.line(0x1000, 0x00000013), "0x00001000: ADDI x0 x0 0");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingConfig {
    /// 输出地址前缀
    pub show_address: bool,
    /// 输出原始指令字
    pub show_raw: bool,
}

impl ListingConfig {
    pub fn with_address(mut self, show: bool) -> Self {
        self.show_address = show;
        self
    }

    pub fn with_raw(mut self, show: bool) -> Self {
        self.show_raw = show;
        self
    }
}

/// 按配置渲染清单行
#[derive(Debug, Clone, Copy, Default)]
pub struct Listing {
    config: ListingConfig,
}

impl Listing {
    pub fn new(config: ListingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ListingConfig {
        self.config
    }

    /// 渲染一条指令
    pub fn line(&self, address: u32, word: u32) -> String {
        let text = format(decode(word));
        match (self.config.show_address, self.config.show_raw) {
            (false, false) => text,
            (true, false) => format!("0x{address:08x}: {text}"),
            (false, true) => format!("0x{word:08x}  {text}"),
            (true, true) => format!("0x{address:08x}: 0x{word:08x}  {text}"),
        }
    }

    /// 按输入顺序渲染：地址为从 0 开始的字序号乘 4
    pub fn indexed_line(&self, index: u32, word: u32) -> String {
        self.line(index.wrapping_mul(4), word)
    }
}
