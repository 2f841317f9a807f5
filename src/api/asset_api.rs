// ==========================================
// 设施资产管理系统 - 资产 API
// ==========================================
// 职责: 资产登记/查询, 基础档案 (分支机构/供应商/SLA) 维护
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_asset;
use crate::domain::asset::{Asset, Branch, Vendor};
use crate::domain::sla::Sla;
use crate::repository::{RepositoryError, Repositories};

pub struct AssetApi {
    repos: Repositories,
}

impl AssetApi {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    // ==========================================
    // 资产
    // ==========================================

    /// 登记资产
    ///
    /// 校验类别必填字段, 分支机构必须存在, id 不可重复
    pub fn register_asset(&self, asset: Asset) -> ApiResult<Asset> {
        validate_asset(&asset)?;

        let branches = self.repos.branches.get_all()?;
        if !branches.iter().any(|b| b.id == asset.branch_id) {
            return Err(RepositoryError::not_found("Branch", &asset.branch_id).into());
        }

        self.repos.assets.update(|assets| {
            if assets.iter().any(|a| a.id == asset.id) {
                return Err(ApiError::BusinessRuleViolation(format!(
                    "资产 id 已存在: {}",
                    asset.id
                )));
            }
            assets.push(asset.clone());
            Ok(())
        })?;
        tracing::info!(asset_id = %asset.id, category = asset.category.label(), "资产已登记");
        Ok(asset)
    }

    pub fn list_assets(&self, branch_id: Option<&str>) -> ApiResult<Vec<Asset>> {
        let assets = self.repos.assets.get_all()?;
        Ok(match branch_id {
            Some(b) => assets.into_iter().filter(|a| a.branch_id == b).collect(),
            None => assets,
        })
    }

    // ==========================================
    // 基础档案
    // ==========================================

    pub fn list_branches(&self) -> ApiResult<Vec<Branch>> {
        Ok(self.repos.branches.get_all()?)
    }

    /// 新增或覆盖分支机构
    pub fn upsert_branch(&self, branch: Branch) -> ApiResult<()> {
        if branch.id.trim().is_empty() {
            return Err(ApiError::InvalidInput("分支机构 id 不能为空".to_string()));
        }
        self.repos.branches.update(|branches| {
            upsert_by_id(branches, branch, |b| &b.id);
            Ok::<_, ApiError>(())
        })
    }

    pub fn list_vendors(&self) -> ApiResult<Vec<Vendor>> {
        Ok(self.repos.vendors.get_all()?)
    }

    /// 新增或覆盖供应商
    pub fn upsert_vendor(&self, vendor: Vendor) -> ApiResult<()> {
        if vendor.id.trim().is_empty() {
            return Err(ApiError::InvalidInput("供应商 id 不能为空".to_string()));
        }
        self.repos.vendors.update(|vendors| {
            upsert_by_id(vendors, vendor, |v| &v.id);
            Ok::<_, ApiError>(())
        })
    }

    pub fn list_slas(&self) -> ApiResult<Vec<Sla>> {
        Ok(self.repos.slas.get_all()?)
    }

    /// 整体替换 SLA 列表（SLA 由外部合同维护, 不做逐条编辑）
    pub fn replace_slas(&self, slas: &[Sla]) -> ApiResult<()> {
        Ok(self.repos.slas.put_all(slas)?)
    }
}

fn upsert_by_id<T, F>(records: &mut Vec<T>, record: T, id_of: F)
where
    F: Fn(&T) -> &String,
{
    match records.iter().position(|r| id_of(r) == id_of(&record)) {
        Some(idx) => records[idx] = record,
        None => records.push(record),
    }
}
