// ==========================================
// 赛事管理系统 - 名单 CSV 解析器
// ==========================================
// 输入: UTF-8 CSV,首行为表头
// 契约: 缺失 name/callsign/heat 列以空字符串填充,不整体失败;
//       字段值按原样保留（身份键不做大小写/空白归一化）
// ==========================================

use crate::domain::roster::RosterRow;
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// 表头列名: 姓名
pub const COLUMN_NAME: &str = "name";
/// 表头列名: 呼号
pub const COLUMN_CALLSIGN: &str = "callsign";
/// 表头列名: 赛组标签
pub const COLUMN_HEAT: &str = "heat";

// ==========================================
// RosterParser Trait
// ==========================================
// 用途: 名单文件解析接口
// 实现者: CsvRosterParser
pub trait RosterParser: Send + Sync {
    /// 解析文件为名单行序列
    ///
    /// # 参数
    /// - file_path: 本地 CSV 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<RosterRow>): 按文件顺序的名单行
    /// - Err: 文件读取错误、CSV 格式错误
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RosterRow>>;
}

// ==========================================
// CsvRosterParser 实现
// ==========================================
// 解析器跨运行不保留任何状态
pub struct CsvRosterParser;

impl RosterParser for CsvRosterParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RosterRow>> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::SourceNotFound(
                file_path.display().to_string(),
            ));
        }

        // 打开 CSV 文件
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 定位目标列（表头匹配时允许首尾空白;其余列忽略）
        let headers = reader.headers()?.clone();
        let find_column = |wanted: &str| -> Option<usize> {
            headers.iter().position(|h| h.trim() == wanted)
        };
        let name_idx = find_column(COLUMN_NAME);
        let callsign_idx = find_column(COLUMN_CALLSIGN);
        let heat_idx = find_column(COLUMN_HEAT);

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;

            // 取值按原样保留,缺失列为空字符串
            let field = |idx: Option<usize>| -> String {
                idx.and_then(|i| record.get(i))
                    .unwrap_or("")
                    .to_string()
            };

            let row = RosterRow {
                name: field(name_idx),
                callsign: field(callsign_idx),
                heat: field(heat_idx),
            };

            // 跳过完全空白的行
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }

            rows.push(row);
        }

        Ok(rows)
    }
}
