use serde::{Deserialize, Serialize};

pub mod date;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中保存登录令牌的键
pub const STORAGE_TOKEN_KEY: &str = "tokomo_token";
/// 认证请求头
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 用户 (User)
// =========================================================

/// 用户记录
///
/// 字段与服务端返回保持一致；`is_admin` / `is_active` 为 0/1 整型标记。
/// `/user/profile` 返回的字段比管理端列表少，因此全部字段带 default。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub is_admin: i64,
    #[serde(default = "default_active")]
    pub is_active: i64,
    #[serde(default)]
    pub vip_expire_date: Option<String>,
    #[serde(default)]
    pub last_login_at: Option<String>,
    #[serde(default)]
    pub created_at: String,
    /// 仅管理端用户详情接口返回
    #[serde(default)]
    pub security_question: Option<String>,
}

fn default_active() -> i64 {
    1
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.is_admin != 0
    }

    pub fn is_active(&self) -> bool {
        self.is_active != 0
    }
}

// =========================================================
// 游戏 (Game)
// =========================================================

/// 游戏目录条目（统一采用带 uuid / price 的最终版 schema）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Game {
    pub id: i64,
    #[serde(default)]
    pub uuid: String,
    pub game_name: String,
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub extract_password: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub created_at: String,
}

/// 带访问权限标注的游戏（`/game/list-with-access`、`/game/:id/details`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameWithAccess {
    #[serde(flatten)]
    pub game: Game,
    #[serde(default, rename = "canViewDownload")]
    pub can_view_download: bool,
    #[serde(default, rename = "accessReason")]
    pub access_reason: Option<String>,
    #[serde(default, rename = "isPurchased")]
    pub is_purchased: bool,
}

impl From<Game> for GameWithAccess {
    /// 未登录上下文：无任何访问标注
    fn from(game: Game) -> Self {
        Self {
            game,
            ..Default::default()
        }
    }
}

/// 游戏库条目（已购买的游戏）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PurchasedGame {
    pub purchase_id: i64,
    #[serde(default)]
    pub game_id: i64,
    pub game_name: String,
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default)]
    pub download_url: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub extract_password: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub purchase_date: String,
}

// =========================================================
// 兑换码 / VIP码 (Codes)
// =========================================================

/// 积分兑换码。`used` 为终态：一旦为 1 不再允许编辑或删除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RedeemCode {
    pub id: i64,
    pub code: String,
    pub points: i64,
    #[serde(default)]
    pub is_free: i64,
    #[serde(default)]
    pub used: i64,
    #[serde(default)]
    pub used_at: Option<String>,
    #[serde(default)]
    pub used_by: Option<i64>,
    #[serde(default)]
    pub created_at: String,
}

impl RedeemCode {
    pub fn is_used(&self) -> bool {
        self.used != 0
    }

    pub fn is_free(&self) -> bool {
        self.is_free != 0
    }
}

/// VIP 码：兑换后延长 `days` 天 VIP 有效期
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VipCode {
    pub id: i64,
    pub code: String,
    pub days: i64,
    #[serde(default)]
    pub used: i64,
    #[serde(default)]
    pub used_at: Option<String>,
    #[serde(default)]
    pub used_by: Option<i64>,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub created_at: String,
}

impl VipCode {
    pub fn is_used(&self) -> bool {
        self.used != 0
    }
}

// =========================================================
// 群组 (Group)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub invite_code: String,
    #[serde(default)]
    pub reward_points: i64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub member_count: Option<i64>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupMember {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub joined_at: String,
}

/// 群组详情：基础信息 + 成员列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: Group,
    #[serde(default)]
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupCodeUsage {
    pub id: i64,
    pub code: String,
    pub points: i64,
    #[serde(default)]
    pub used_at: String,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupStatistics {
    #[serde(default)]
    pub total_codes_used: i64,
    #[serde(default)]
    pub total_points_rewarded: i64,
    #[serde(default)]
    pub codes: Vec<GroupCodeUsage>,
}

// =========================================================
// 站点配置 (SiteConfig)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImageConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CustomerService {
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub qq: String,
}

/// 单例站点配置，仅管理员可写
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub carousel: Vec<ImageConfig>,
    #[serde(default, rename = "bannerL")]
    pub banner_l: ImageConfig,
    #[serde(default, rename = "bannerR")]
    pub banner_r: ImageConfig,
    #[serde(default, rename = "customerService")]
    pub customer_service: CustomerService,
    #[serde(default)]
    pub updated_at: String,
}

// =========================================================
// 分页 (Pagination)
// =========================================================

/// 列表接口统一返回的分页信息
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total: 0,
            total_pages: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct GameListResponse {
    pub games: Vec<Game>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct GameAccessListResponse {
    pub games: Vec<GameWithAccess>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct PurchasedListResponse {
    pub games: Vec<PurchasedGame>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct RedeemCodeListResponse {
    pub codes: Vec<RedeemCode>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct VipCodeListResponse {
    pub codes: Vec<VipCode>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct UserListResponse {
    pub users: Vec<User>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct GroupListResponse {
    pub groups: Vec<Group>,
    #[serde(default)]
    pub pagination: Pagination,
}

// =========================================================
// 请求体 (Requests) —— 服务端字段采用 camelCase
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub security_question: String,
    pub security_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub username: String,
    pub security_answer: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameUpsertRequest {
    pub game_name: String,
    pub download_url: String,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub game_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCodeRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRedeemCodeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub points: i64,
    pub is_free: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRedeemCodeRequest {
    pub count: u32,
    pub points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub is_free: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRedeemCodeRequest {
    pub points: i64,
    pub is_free: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVipCodeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchVipCodeRequest {
    pub count: u32,
    pub days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVipCodeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    pub used: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    pub reward_points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    pub reward_points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    /// None 序列化为 null，表示清除 VIP 到期时间
    pub vip_expire_date: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResetPasswordRequest {
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteConfigRequest {
    pub carousel: Vec<ImageConfig>,
    #[serde(rename = "bannerL")]
    pub banner_l: ImageConfig,
    #[serde(rename = "bannerR")]
    pub banner_r: ImageConfig,
    pub customer_service: CustomerService,
}

// =========================================================
// 响应体 (Responses)
// =========================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityQuestionResponse {
    pub question: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct BatchCreateResponse {
    pub created: u32,
    #[serde(default)]
    pub codes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ImportResponse {
    #[serde(default)]
    pub imported: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// `/redeem/use` 结果：本次兑换到账的积分
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RedeemUseResponse {
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// `/vip/use` 结果
#[derive(Debug, Clone, Deserialize, Default)]
pub struct VipUseResponse {
    #[serde(default)]
    pub days: i64,
    #[serde(default)]
    pub vip_expire_date: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 所有错误响应统一为 `{"error": "..."}`，消息原样透出给用户
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_profile_payload_decodes_without_admin_fields() {
        // /user/profile 只返回基础字段
        let u: User =
            serde_json::from_str(r#"{"id":7,"username":"alice","points":120}"#).unwrap();
        assert_eq!(u.username, "alice");
        assert_eq!(u.points, 120);
        assert!(!u.is_admin());
        assert!(u.is_active());
        assert!(u.vip_expire_date.is_none());
    }

    #[test]
    fn game_with_access_flattens_camel_case_annotations() {
        let json = r#"{
            "id": 3, "uuid": "ab-12", "game_name": "demo", "download_url": "https://x/d",
            "price": 50, "created_at": "2025-01-01T00:00:00Z",
            "canViewDownload": true, "accessReason": "vip", "isPurchased": false
        }"#;
        let g: GameWithAccess = serde_json::from_str(json).unwrap();
        assert_eq!(g.game.game_name, "demo");
        assert_eq!(g.game.price, 50);
        assert!(g.can_view_download);
        assert_eq!(g.access_reason.as_deref(), Some("vip"));
        assert!(!g.is_purchased);
    }

    #[test]
    fn pagination_uses_total_pages_alias() {
        let list: RedeemCodeListResponse = serde_json::from_str(
            r#"{"codes":[],"pagination":{"page":2,"limit":10,"total":35,"totalPages":4}}"#,
        )
        .unwrap();
        assert_eq!(list.pagination.page, 2);
        assert_eq!(list.pagination.total_pages, 4);
    }

    #[test]
    fn used_flag_is_terminal_helper() {
        let code = RedeemCode {
            used: 1,
            ..Default::default()
        };
        assert!(code.is_used());
        let fresh = RedeemCode::default();
        assert!(!fresh.is_used());
    }

    #[test]
    fn upsert_game_serializes_camel_case_and_skips_empty_options() {
        let req = GameUpsertRequest {
            game_name: "g".into(),
            download_url: "u".into(),
            price: 10,
            game_type: None,
            extract_password: None,
            password: None,
            note: Some("n".into()),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["gameName"], "g");
        assert_eq!(v["downloadUrl"], "u");
        assert_eq!(v["note"], "n");
        assert!(v.get("gameType").is_none());
    }

    #[test]
    fn update_user_serializes_null_vip_expire() {
        let req = UpdateUserRequest {
            points: Some(5),
            vip_expire_date: None,
            is_admin: false,
            is_active: true,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert!(v["vipExpireDate"].is_null());
        assert_eq!(v["isActive"], true);
    }

    #[test]
    fn site_config_round_trips_banner_aliases() {
        let json = r#"{
            "carousel": [{"url":"https://a/1.png","title":"一"}],
            "bannerL": {"url":"l","title":"L"},
            "bannerR": {"url":"r","title":"R"},
            "customerService": {"img":"q.png","qq":"12345"},
            "updated_at": "2025-02-02T00:00:00Z"
        }"#;
        let cfg: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.carousel.len(), 1);
        assert_eq!(cfg.banner_l.title, "L");
        assert_eq!(cfg.customer_service.qq, "12345");
    }
}
