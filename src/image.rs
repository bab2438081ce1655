//! RV32 ELF 镜像加载
//!
//! 只关心可执行的 `PT_LOAD` 段：把段数据切成小端 32-bit 字，
//! 连同虚拟地址一起交给反汇编器。
//!
//! # 示例
//!
//! ```no_run
//! use rv32i_disasm::image::ElfImage;
//! use rv32i_disasm::isa::disassemble;
//!
//! let image = ElfImage::parse("program.elf").expect("Failed to load ELF");
//! for (addr, word) in image.words() {
//!     println!("0x{addr:08x}: {}", disassemble(word));
//! }
//! ```

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use elf::abi::{EM_RISCV, PF_X, PT_LOAD};
use elf::endian::AnyEndian;
use elf::ElfBytes;
use thiserror::Error;

/// ELF 加载错误
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("ELF parse error: {0}")]
    Parse(String),
    #[error("Not a RISC-V ELF (machine type: 0x{machine:x}, expected 0x{:x})", EM_RISCV)]
    NotRiscV { machine: u16 },
    #[error("Only 32-bit ELF is supported")]
    Not32Bit,
    #[error("Only little-endian ELF is supported")]
    BigEndian,
    #[error("ELF has no executable segments")]
    NoCode,
}

/// 可执行段
#[derive(Debug, Clone)]
pub struct CodeSegment {
    /// 虚拟地址
    pub vaddr: u32,
    /// 文件中的段数据
    pub data: Vec<u8>,
}

impl CodeSegment {
    /// 按小端序逐字切分，末尾不足 4 字节的部分丢弃
    pub fn words(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.data.chunks_exact(4).enumerate().map(move |(i, chunk)| {
            let addr = self.vaddr.wrapping_add((i * 4) as u32);
            let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            (addr, word)
        })
    }
}

/// 解析后的 ELF 镜像
#[derive(Debug, Clone)]
pub struct ElfImage {
    /// 入口地址
    pub entry: u32,
    /// 可执行段，按程序头顺序
    pub segments: Vec<CodeSegment>,
}

impl ElfImage {
    /// 解析 ELF 文件
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        Self::parse_bytes(&data)
    }

    /// 从字节数组解析 ELF（使用 elf crate）
    pub fn parse_bytes(data: &[u8]) -> Result<Self, ImageError> {
        let elf_file = ElfBytes::<AnyEndian>::minimal_parse(data)
            .map_err(|e| ImageError::Parse(format!("Failed to parse ELF: {}", e)))?;

        let header = &elf_file.ehdr;
        if header.e_machine != EM_RISCV {
            return Err(ImageError::NotRiscV { machine: header.e_machine });
        }
        if header.class != elf::file::Class::ELF32 {
            return Err(ImageError::Not32Bit);
        }
        if header.endianness != AnyEndian::Little {
            return Err(ImageError::BigEndian);
        }

        let mut segments = Vec::new();
        if let Some(phdrs) = elf_file.segments() {
            for phdr in phdrs {
                if phdr.p_type != PT_LOAD {
                    continue;
                }
                let vaddr = phdr.p_vaddr as u32;
                if phdr.p_flags & PF_X == 0 {
                    log::debug!("skipping non-executable segment at 0x{:08x}", vaddr);
                    continue;
                }

                let data = elf_file
                    .segment_data(&phdr)
                    .map_err(|e| ImageError::Parse(format!("Failed to read segment data: {}", e)))?
                    .to_vec();
                let tail = data.len() % 4;
                if tail != 0 {
                    log::warn!(
                        "segment at 0x{:08x} ends with {} trailing byte(s); ignoring them",
                        vaddr,
                        tail
                    );
                }
                log::debug!("code segment at 0x{:08x}, {} bytes", vaddr, data.len());
                segments.push(CodeSegment { vaddr, data });
            }
        }

        if segments.is_empty() {
            return Err(ImageError::NoCode);
        }

        Ok(ElfImage {
            entry: header.e_entry as u32,
            segments,
        })
    }

    /// 所有可执行段中的 `(地址, 指令字)`
    pub fn words(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.segments.iter().flat_map(|segment| segment.words())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造最小的 ELF32 小端镜像：一个程序头，无节头
    fn build_elf(machine: u16, flags: u32, vaddr: u32, code: &[u8]) -> Vec<u8> {
        const EHDR_SIZE: u32 = 52;
        const PHDR_SIZE: u32 = 32;
        let code_off = EHDR_SIZE + PHDR_SIZE;

        let mut out = Vec::new();
        out.extend_from_slice(&[0x7F, b'E', b'L', b'F', 1, 1, 1, 0]);
        out.extend_from_slice(&[0; 8]);
        out.extend_from_slice(&2u16.to_le_bytes()); // e_type = EXEC
        out.extend_from_slice(&machine.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes()); // e_version
        out.extend_from_slice(&vaddr.to_le_bytes()); // e_entry
        out.extend_from_slice(&EHDR_SIZE.to_le_bytes()); // e_phoff
        out.extend_from_slice(&0u32.to_le_bytes()); // e_shoff
        out.extend_from_slice(&0u32.to_le_bytes()); // e_flags
        out.extend_from_slice(&(EHDR_SIZE as u16).to_le_bytes());
        out.extend_from_slice(&(PHDR_SIZE as u16).to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // e_phnum
        out.extend_from_slice(&40u16.to_le_bytes()); // e_shentsize
        out.extend_from_slice(&0u16.to_le_bytes()); // e_shnum
        out.extend_from_slice(&0u16.to_le_bytes()); // e_shstrndx
        assert_eq!(out.len() as u32, EHDR_SIZE);

        out.extend_from_slice(&PT_LOAD.to_le_bytes());
        out.extend_from_slice(&code_off.to_le_bytes()); // p_offset
        out.extend_from_slice(&vaddr.to_le_bytes()); // p_vaddr
        out.extend_from_slice(&vaddr.to_le_bytes()); // p_paddr
        out.extend_from_slice(&(code.len() as u32).to_le_bytes()); // p_filesz
        out.extend_from_slice(&(code.len() as u32).to_le_bytes()); // p_memsz
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&4u32.to_le_bytes()); // p_align
        assert_eq!(out.len() as u32, code_off);

        out.extend_from_slice(code);
        out
    }

    fn code_bytes(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn test_parse_executable_segment() {
        let code = code_bytes(&[0x00000013, 0x00100073]);
        let bytes = build_elf(EM_RISCV, PF_X | elf::abi::PF_R, 0x1000, &code);
        let image = ElfImage::parse_bytes(&bytes).expect("valid image");

        assert_eq!(image.entry, 0x1000);
        assert_eq!(image.segments.len(), 1);
        let words: Vec<_> = image.words().collect();
        assert_eq!(words, vec![(0x1000, 0x00000013), (0x1004, 0x00100073)]);
    }

    #[test]
    fn test_trailing_bytes_are_dropped() {
        let mut code = code_bytes(&[0x00000033]);
        code.extend_from_slice(&[0x13, 0x00]);
        let bytes = build_elf(EM_RISCV, PF_X, 0x80, &code);
        let image = ElfImage::parse_bytes(&bytes).expect("valid image");
        assert_eq!(image.words().collect::<Vec<_>>(), vec![(0x80, 0x00000033)]);
    }

    #[test]
    fn test_rejects_foreign_machine() {
        const EM_X86_64: u16 = 62;
        let bytes = build_elf(EM_X86_64, PF_X, 0, &code_bytes(&[0x13]));
        assert!(matches!(
            ElfImage::parse_bytes(&bytes),
            Err(ImageError::NotRiscV { machine: 62 })
        ));
    }

    #[test]
    fn test_rejects_image_without_code() {
        let bytes = build_elf(EM_RISCV, elf::abi::PF_R, 0, &code_bytes(&[0x13]));
        assert!(matches!(ElfImage::parse_bytes(&bytes), Err(ImageError::NoCode)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            ElfImage::parse_bytes(b"not an elf"),
            Err(ImageError::Parse(_))
        ));
    }
}
