// ==========================================
// 赛事管理系统 - 名单导入器实现
// ==========================================
// 职责: 整合导入流程,从来源到注册表
// 流程: 来源解析 → CSV 解析 → 对账/归组 → 结构生成 → 广播/通知
// ==========================================

use crate::config::ImporterConfigReader;
use crate::config::option_keys;
use crate::domain::roster::ImportSummary;
use crate::domain::types::SourceMode;
use crate::host::UiMessenger;
use crate::i18n::{t, t_with_args};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::generator::RaceStructureGenerator;
use crate::importer::heat_grouping::HeatPlan;
use crate::importer::reconciler::PilotReconciler;
use crate::importer::roster_importer_trait::RosterImporter;
use crate::importer::roster_parser::RosterParser;
use crate::importer::source_resolver::SourceResolver;
use crate::repository::{PilotRegistry, RaceRegistry};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RosterImporterImpl - 名单导入器实现
// ==========================================
pub struct RosterImporterImpl<P, R, C>
where
    P: PilotRegistry,
    R: RaceRegistry,
    C: ImporterConfigReader,
{
    // 数据访问层
    pilot_registry: P,
    race_registry: R,

    // 配置读取器
    config: C,

    // 导入组件
    resolver: SourceResolver,
    parser: Box<dyn RosterParser>,

    // 宿主 UI 接口
    messenger: Box<dyn UiMessenger>,
}

impl<P, R, C> RosterImporterImpl<P, R, C>
where
    P: PilotRegistry,
    R: RaceRegistry,
    C: ImporterConfigReader,
{
    /// 创建新的 RosterImporter 实例
    ///
    /// # 参数
    /// - pilot_registry: 飞手注册表
    /// - race_registry: 赛级/赛组注册表
    /// - config: 配置读取器
    /// - resolver: 来源解析器
    /// - parser: CSV 解析器
    /// - messenger: 宿主 UI 通知接口
    pub fn new(
        pilot_registry: P,
        race_registry: R,
        config: C,
        resolver: SourceResolver,
        parser: Box<dyn RosterParser>,
        messenger: Box<dyn UiMessenger>,
    ) -> Self {
        Self {
            pilot_registry,
            race_registry,
            config,
            resolver,
            parser,
            messenger,
        }
    }

    fn config_err(key: &str, source: Box<dyn std::error::Error>) -> ImportError {
        ImportError::ConfigReadError {
            key: key.to_string(),
            message: source.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl<P, R, C> RosterImporter for RosterImporterImpl<P, R, C>
where
    P: PilotRegistry,
    R: RaceRegistry,
    C: ImporterConfigReader,
{
    #[instrument(skip(self), fields(run_id))]
    async fn import(&self) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        info!(run_id = %run_id, "开始导入飞手名单");

        // === 读取宿主选项 ===
        let class_name = self
            .config
            .get_class_name()
            .await
            .map_err(|e| Self::config_err(option_keys::CLASS_NAME, e))?;
        let mode_raw = self
            .config
            .get_import_mode()
            .await
            .map_err(|e| Self::config_err(option_keys::IMPORT_MODE, e))?;
        let location = self
            .config
            .get_source_location()
            .await
            .map_err(|e| Self::config_err(option_keys::SOURCE_LOCATION, e))?;

        let mode = SourceMode::parse(&mode_raw, &location)
            .ok_or_else(|| ImportError::UnsupportedMode(mode_raw.clone()))?;
        info!(mode = %mode, class_name = %class_name, "导入参数就绪");

        // === 步骤 1: 来源解析 ===
        debug!("步骤 1: 来源解析");
        let file_path = match self.resolver.resolve(&mode).await {
            Ok(path) => path,
            Err(ImportError::SourceNotFound(path)) => {
                // 注册表尚未发生任何写入,直接告警并中止
                self.messenger
                    .alert(&t_with_args("import.source_not_found", &[("path", &path)]));
                warn!(path = %path, "找不到名单 CSV 文件");
                return Err(ImportError::SourceNotFound(path));
            }
            Err(ImportError::FetchFailure { url, message }) => {
                self.messenger
                    .alert(&t_with_args("import.fetch_failed", &[("reason", &message)]));
                warn!(url = %url, error = %message, "远程名单拉取失败");
                return Err(ImportError::FetchFailure { url, message });
            }
            Err(e) => return Err(e),
        };

        // === 步骤 2: CSV 解析 ===
        debug!("步骤 2: CSV 解析");
        let rows = self.parser.parse_rows(&file_path)?;
        let total_rows = rows.len();
        info!(total_rows = total_rows, "名单解析完成");

        // === 步骤 3: 飞手对账 + 归组 ===
        debug!("步骤 3: 飞手对账与归组");
        let reconciler = PilotReconciler::new(&self.pilot_registry);
        let mut plan = HeatPlan::new();
        let mut pilots_created = 0usize;
        let mut pilots_existing = 0usize;
        for row in &rows {
            let outcome = reconciler.reconcile(row)?;
            if outcome.created {
                pilots_created += 1;
            } else {
                pilots_existing += 1;
            }
            plan.push(&row.heat, outcome.pilot_id);
        }
        // 飞手列表变更只广播一次,不逐飞手广播
        self.messenger.broadcast_pilots();
        info!(
            created = pilots_created,
            existing = pilots_existing,
            groups = plan.group_count(),
            "对账完成,开始生成赛组"
        );

        // === 步骤 4: 赛级/赛组生成 ===
        debug!("步骤 4: 赛级/赛组生成");
        let generator = RaceStructureGenerator::new(&self.race_registry);
        let generate_result = generator.generate(&plan, &class_name);

        // 无论生成成败,赛级/赛组列表都可能已变更,两个分支都广播
        self.messenger.broadcast_raceclasses();
        self.messenger.broadcast_heats();

        let report = match generate_result {
            Ok(report) => report,
            Err(ImportError::DuplicateClassName(name)) => {
                // 已创建的飞手不回滚（与宿主数据层约定一致）
                self.messenger.alert(&t("import.class_exists"));
                warn!(class_name = %name, "赛级名称已存在,导入中止");
                return Err(ImportError::DuplicateClassName(name));
            }
            Err(e) => return Err(e),
        };

        // === 步骤 5: 通知 ===
        self.messenger.notify(&t("import.success"));
        if !report.overflows.is_empty() {
            // 溢出不是整体失败: 成功通知之外再给一条告警
            self.messenger.alert(&t_with_args(
                "import.slot_overflow",
                &[("count", &report.overflows.len().to_string())],
            ));
        }

        let summary = ImportSummary {
            run_id,
            total_rows,
            pilots_created,
            pilots_existing,
            heats_created: report.heats_created,
            slots_assigned: report.slots_assigned,
            overflows: report.overflows,
            elapsed_ms: start_time.elapsed().as_millis() as i64,
        };
        info!(
            total_rows = summary.total_rows,
            pilots_created = summary.pilots_created,
            heats_created = summary.heats_created,
            slots_assigned = summary.slots_assigned,
            elapsed_ms = summary.elapsed_ms,
            "名单导入完成"
        );
        Ok(summary)
    }
}
