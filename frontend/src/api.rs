//! HTTP 客户端模块
//!
//! 所有业务逻辑都在服务端，这里是唯一的网络出口：
//! 基于 gloo-net 封装 REST 调用，每次请求发出时从 LocalStorage
//! 读取令牌注入 Bearer 头。错误统一映射为 [`ApiError`]，
//! 服务端 `{"error": "..."}` 的消息原样透出给提示层。

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;

use crate::web::LocalStorage;
use crate::web::route::encode_component;
use tokomo_shared::*;

// =========================================================
// 错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 请求未到达服务端（网络中断、CORS 等）
    Network(String),
    /// 服务端返回非 2xx，message 为服务端给出的原文或状态码兜底
    Server { status: u16, message: String },
    /// 响应体无法按预期结构解析
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(e) => write!(f, "网络错误: {e}"),
            Self::Server { message, .. } => write!(f, "{message}"),
            Self::Decode(e) => write!(f, "响应解析失败: {e}"),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

fn net(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

fn enc(e: gloo_net::Error) -> ApiError {
    ApiError::Decode(e.to_string())
}

// =========================================================
// 查询串构造
// =========================================================

/// 纯函数式的查询串构造器，值自动做百分号编码
#[derive(Debug, Default)]
pub struct Query {
    parts: Vec<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, page: u32, limit: u32) -> Self {
        self.add("page", &page.to_string())
            .add("limit", &limit.to_string())
    }

    pub fn add(mut self, key: &str, value: &str) -> Self {
        self.parts
            .push(format!("{key}={}", encode_component(value)));
        self
    }

    pub fn add_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.add(key, v),
            _ => self,
        }
    }

    pub fn add_flag(self, key: &str, value: Option<bool>) -> Self {
        match value {
            Some(v) => self.add(key, if v { "1" } else { "0" }),
            None => self,
        }
    }

    pub fn build(self) -> String {
        if self.parts.is_empty() {
            String::new()
        } else {
            format!("?{}", self.parts.join("&"))
        }
    }
}

// =========================================================
// API 客户端
// =========================================================

#[derive(Clone, Debug, PartialEq)]
pub struct TokomoApi {
    base_url: String,
}

impl Default for TokomoApi {
    fn default() -> Self {
        Self::new("/api".to_string())
    }
}

impl TokomoApi {
    pub fn new(base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 注入 Bearer 头；令牌在每次请求发出时读取（唯一的共享可变资源）
    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match LocalStorage::token() {
            Some(token) => req.header(HEADER_AUTHORIZATION, &format!("Bearer {token}")),
            None => req,
        }
    }

    /// 非 2xx 统一转为 ApiError::Server，优先透出服务端消息
    async fn expect_ok(res: Response) -> ApiResult<Response> {
        if res.ok() {
            return Ok(res);
        }
        let status = res.status();
        let message = match res.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("请求失败 ({status})"),
        };
        Err(ApiError::Server { status, message })
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> ApiResult<T> {
        let res = self
            .authed(Request::get(&self.url(path_and_query)))
            .send()
            .await
            .map_err(net)?;
        Self::expect_ok(res).await?.json().await.map_err(enc)
    }

    async fn send_json<B, T>(&self, method: &str, path: &str, body: &B) -> ApiResult<T>
    where
        B: serde::Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let builder = match method {
            "POST" => Request::post(&url),
            "PUT" => Request::put(&url),
            _ => Request::delete(&url),
        };
        let res = self
            .authed(builder)
            .json(body)
            .map_err(enc)?
            .send()
            .await
            .map_err(net)?;
        Self::expect_ok(res).await?.json().await.map_err(enc)
    }

    /// 无响应体（或响应体不关心）的变更请求
    async fn send_empty(&self, method: &str, path: &str) -> ApiResult<()> {
        let url = self.url(path);
        let builder = match method {
            "POST" => Request::post(&url),
            "PUT" => Request::put(&url),
            _ => Request::delete(&url),
        };
        let res = self.authed(builder).send().await.map_err(net)?;
        Self::expect_ok(res).await?;
        Ok(())
    }

    // =====================================================
    // 用户与会话
    // =====================================================

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<AuthResponse> {
        self.send_json("POST", "/user/login", req).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.send_json("POST", "/user/register", req).await
    }

    pub async fn security_question(&self, username: &str) -> ApiResult<SecurityQuestionResponse> {
        let q = Query::new().add("username", username).build();
        self.get_json(&format!("/user/securityQuestion{q}")).await
    }

    pub async fn reset_password(&self, req: &ResetPasswordRequest) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self.send_json("POST", "/user/resetPassword", req).await?;
        Ok(())
    }

    pub async fn profile(&self) -> ApiResult<User> {
        self.get_json("/user/profile").await
    }

    // =====================================================
    // 用户管理（管理员）
    // =====================================================

    pub async fn list_users(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> ApiResult<UserListResponse> {
        let q = Query::new().page(page, limit).add_opt("search", search).build();
        self.get_json(&format!("/user/admin/list{q}")).await
    }

    pub async fn get_user(&self, id: i64) -> ApiResult<User> {
        self.get_json(&format!("/user/admin/{id}")).await
    }

    pub async fn update_user(&self, id: i64, req: &UpdateUserRequest) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self
            .send_json("PUT", &format!("/user/admin/{id}"), req)
            .await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        self.send_empty("DELETE", &format!("/user/admin/{id}")).await
    }

    pub async fn admin_reset_password(
        &self,
        id: i64,
        req: &AdminResetPasswordRequest,
    ) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self
            .send_json("POST", &format!("/user/admin/{id}/resetPassword"), req)
            .await?;
        Ok(())
    }

    // =====================================================
    // 游戏
    // =====================================================

    pub async fn list_games(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> ApiResult<GameListResponse> {
        let q = Query::new().page(page, limit).add_opt("search", search).build();
        self.get_json(&format!("/game/list{q}")).await
    }

    /// 带访问权限标注的列表（需要登录）
    pub async fn list_games_with_access(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> ApiResult<GameAccessListResponse> {
        let q = Query::new().page(page, limit).add_opt("search", search).build();
        self.get_json(&format!("/game/list-with-access{q}")).await
    }

    pub async fn get_game(&self, id: i64) -> ApiResult<Game> {
        self.get_json(&format!("/game/{id}")).await
    }

    /// 游戏详情（含下载权限判定，需要登录）
    pub async fn game_details(&self, id: i64) -> ApiResult<GameWithAccess> {
        self.get_json(&format!("/game/{id}/details")).await
    }

    pub async fn create_game(&self, req: &GameUpsertRequest) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self.send_json("POST", "/game/create", req).await?;
        Ok(())
    }

    pub async fn update_game(&self, id: i64, req: &GameUpsertRequest) -> ApiResult<()> {
        let _: serde::de::IgnoredAny =
            self.send_json("PUT", &format!("/game/{id}"), req).await?;
        Ok(())
    }

    pub async fn delete_game(&self, id: i64) -> ApiResult<()> {
        self.send_empty("DELETE", &format!("/game/{id}")).await
    }

    pub async fn purchase_game(&self, game_id: i64) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self
            .send_json("POST", "/game/purchase", &PurchaseRequest { game_id })
            .await?;
        Ok(())
    }

    pub async fn purchased_games(&self, page: u32, limit: u32) -> ApiResult<PurchasedListResponse> {
        let q = Query::new().page(page, limit).build();
        self.get_json(&format!("/game/purchased{q}")).await
    }

    // =====================================================
    // 兑换码
    // =====================================================

    pub async fn list_redeem_codes(
        &self,
        page: u32,
        limit: u32,
        used: Option<bool>,
        is_free: Option<bool>,
    ) -> ApiResult<RedeemCodeListResponse> {
        let q = Query::new()
            .page(page, limit)
            .add_flag("used", used)
            .add_flag("isFree", is_free)
            .build();
        self.get_json(&format!("/redeem/codes{q}")).await
    }

    pub async fn create_redeem_code(&self, req: &CreateRedeemCodeRequest) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self.send_json("POST", "/redeem/codes", req).await?;
        Ok(())
    }

    pub async fn batch_create_redeem_codes(
        &self,
        req: &BatchRedeemCodeRequest,
    ) -> ApiResult<BatchCreateResponse> {
        self.send_json("POST", "/redeem/codes/batch", req).await
    }

    pub async fn update_redeem_code(
        &self,
        id: i64,
        req: &UpdateRedeemCodeRequest,
    ) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self
            .send_json("PUT", &format!("/redeem/codes/{id}"), req)
            .await?;
        Ok(())
    }

    pub async fn delete_redeem_code(&self, id: i64) -> ApiResult<()> {
        self.send_empty("DELETE", &format!("/redeem/codes/{id}")).await
    }

    pub async fn use_redeem_code(&self, code: &str) -> ApiResult<RedeemUseResponse> {
        self.send_json(
            "POST",
            "/redeem/use",
            &UseCodeRequest {
                code: code.to_string(),
            },
        )
        .await
    }

    /// 表格导入：文件原样上交，解析在服务端
    pub async fn import_redeem_codes(&self, file: web_sys::File) -> ApiResult<ImportResponse> {
        let form = web_sys::FormData::new()
            .map_err(|_| ApiError::Network("无法构造上传表单".to_string()))?;
        form.append_with_blob("file", &file)
            .map_err(|_| ApiError::Network("无法附加上传文件".to_string()))?;
        let res = self
            .authed(Request::post(&self.url("/redeem/codes/import")))
            .body(form)
            .map_err(enc)?
            .send()
            .await
            .map_err(net)?;
        Self::expect_ok(res).await?.json().await.map_err(enc)
    }

    /// 表格导出：服务端生成文件，这里拿到原始字节
    pub async fn export_redeem_codes(&self) -> ApiResult<Vec<u8>> {
        let res = self
            .authed(Request::get(&self.url("/redeem/codes/export")))
            .send()
            .await
            .map_err(net)?;
        Self::expect_ok(res).await?.binary().await.map_err(enc)
    }

    // =====================================================
    // VIP 码
    // =====================================================

    pub async fn list_vip_codes(
        &self,
        page: u32,
        limit: u32,
        used: Option<bool>,
    ) -> ApiResult<VipCodeListResponse> {
        let q = Query::new().page(page, limit).add_flag("used", used).build();
        self.get_json(&format!("/vip/codes{q}")).await
    }

    pub async fn create_vip_code(&self, req: &CreateVipCodeRequest) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self.send_json("POST", "/vip/codes", req).await?;
        Ok(())
    }

    pub async fn batch_create_vip_codes(
        &self,
        req: &BatchVipCodeRequest,
    ) -> ApiResult<BatchCreateResponse> {
        self.send_json("POST", "/vip/codes/batch", req).await
    }

    pub async fn update_vip_code(&self, id: i64, req: &UpdateVipCodeRequest) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self
            .send_json("PUT", &format!("/vip/codes/{id}"), req)
            .await?;
        Ok(())
    }

    pub async fn delete_vip_code(&self, id: i64) -> ApiResult<()> {
        self.send_empty("DELETE", &format!("/vip/codes/{id}")).await
    }

    pub async fn use_vip_code(&self, code: &str) -> ApiResult<VipUseResponse> {
        self.send_json(
            "POST",
            "/vip/use",
            &UseCodeRequest {
                code: code.to_string(),
            },
        )
        .await
    }

    // =====================================================
    // 群组
    // =====================================================

    pub async fn list_groups(&self, page: u32, limit: u32) -> ApiResult<GroupListResponse> {
        let q = Query::new().page(page, limit).build();
        self.get_json(&format!("/group/list{q}")).await
    }

    pub async fn create_group(&self, req: &CreateGroupRequest) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self.send_json("POST", "/group/create", req).await?;
        Ok(())
    }

    pub async fn get_group(&self, id: i64) -> ApiResult<GroupDetail> {
        self.get_json(&format!("/group/{id}")).await
    }

    pub async fn update_group(&self, id: i64, req: &UpdateGroupRequest) -> ApiResult<()> {
        let _: serde::de::IgnoredAny =
            self.send_json("PUT", &format!("/group/{id}"), req).await?;
        Ok(())
    }

    pub async fn delete_group(&self, id: i64) -> ApiResult<()> {
        self.send_empty("DELETE", &format!("/group/{id}")).await
    }

    pub async fn group_statistics(
        &self,
        id: i64,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ApiResult<GroupStatistics> {
        let q = Query::new()
            .add_opt("startDate", start_date)
            .add_opt("endDate", end_date)
            .build();
        self.get_json(&format!("/group/{id}/statistics{q}")).await
    }

    pub async fn add_group_member(&self, id: i64, user_id: i64) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self
            .send_json(
                "POST",
                &format!("/group/{id}/members/add"),
                &AddMemberRequest { user_id },
            )
            .await?;
        Ok(())
    }

    pub async fn remove_group_member(&self, id: i64, user_id: i64) -> ApiResult<()> {
        self.send_empty("DELETE", &format!("/group/{id}/members/{user_id}"))
            .await
    }

    // =====================================================
    // 站点配置
    // =====================================================

    pub async fn site_config(&self) -> ApiResult<SiteConfig> {
        self.get_json("/site/config").await
    }

    pub async fn update_site_config(&self, req: &UpdateSiteConfigRequest) -> ApiResult<()> {
        let _: serde::de::IgnoredAny = self.send_json("PUT", "/site/config", req).await?;
        Ok(())
    }
}

// =========================================================
// 浏览器下载
// =========================================================

/// 把服务端返回的字节流触发为浏览器下载
pub fn download_bytes(filename: &str, bytes: &[u8]) -> bool {
    fn inner(filename: &str, bytes: &[u8]) -> Option<()> {
        let array = js_sys::Array::new();
        array.push(&js_sys::Uint8Array::from(bytes));
        let blob = web_sys::Blob::new_with_u8_array_sequence(&array).ok()?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).ok()?;

        let document = web_sys::window()?.document()?;
        let anchor: web_sys::HtmlAnchorElement =
            document.create_element("a").ok()?.dyn_into().ok()?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();
        let _ = web_sys::Url::revoke_object_url(&url);
        Some(())
    }
    inner(filename, bytes).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_builds_page_and_filters() {
        let q = Query::new()
            .page(2, 10)
            .add_opt("search", Some("东方"))
            .add_flag("used", Some(false))
            .build();
        assert_eq!(q, "?page=2&limit=10&search=%E4%B8%9C%E6%96%B9&used=0");
    }

    #[test]
    fn query_skips_empty_and_absent_values() {
        let q = Query::new()
            .add_opt("search", None)
            .add_opt("startDate", Some(""))
            .add_flag("used", None)
            .build();
        assert_eq!(q, "");
    }

    #[test]
    fn server_error_displays_message_verbatim() {
        let err = ApiError::Server {
            status: 409,
            message: "兑换码已被使用".to_string(),
        };
        assert_eq!(err.to_string(), "兑换码已被使用");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = TokomoApi::new("https://example.com/api/".to_string());
        assert_eq!(api.url("/game/list"), "https://example.com/api/game/list");
        assert_eq!(api.url("game/list"), "https://example.com/api/game/list");
    }
}
