//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、守卫属性以及 URL 编解码工具。

use std::fmt::Display;

/// 管理后台子页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminSection {
    #[default]
    Dashboard,
    Users,
    Games,
    RedeemCodes,
    VipCodes,
    Groups,
    Config,
}

impl AdminSection {
    fn from_segment(seg: &str) -> Option<Self> {
        match seg {
            "" => Some(Self::Dashboard),
            "users" => Some(Self::Users),
            "games" => Some(Self::Games),
            "redeem-codes" => Some(Self::RedeemCodes),
            "vip-codes" => Some(Self::VipCodes),
            "groups" => Some(Self::Groups),
            "config" => Some(Self::Config),
            _ => None,
        }
    }

    fn segment(&self) -> &'static str {
        match self {
            Self::Dashboard => "",
            Self::Users => "users",
            Self::Games => "games",
            Self::RedeemCodes => "redeem-codes",
            Self::VipCodes => "vip-codes",
            Self::Groups => "groups",
            Self::Config => "config",
        }
    }
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页（默认路由）
    #[default]
    Home,
    /// 搜索结果页，q 为关键词（可为空）
    Search { q: String },
    /// 游戏详情页
    GameDetail { id: i64 },
    /// 游戏库（需要登录）
    Library,
    /// 个人中心（需要登录）
    Profile,
    /// 登录 / 注册 / 找回密码
    Auth,
    /// 管理后台（需要管理员）
    Admin(AdminSection),
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path + query 解析为路由枚举
    pub fn from_location(path: &str, query: &str) -> Self {
        let path = path.trim_end_matches('/');
        match path {
            "" => Self::Home,
            "/search" => Self::Search {
                q: query_param(query, "q").unwrap_or_default(),
            },
            "/library" => Self::Library,
            "/profile" => Self::Profile,
            "/auth" => Self::Auth,
            "/admin" => Self::Admin(AdminSection::Dashboard),
            _ => {
                if let Some(id) = path.strip_prefix("/game/") {
                    match id.parse::<i64>() {
                        Ok(id) => Self::GameDetail { id },
                        Err(_) => Self::NotFound,
                    }
                } else if let Some(seg) = path.strip_prefix("/admin/") {
                    match AdminSection::from_segment(seg) {
                        Some(section) => Self::Admin(section),
                        None => Self::NotFound,
                    }
                } else {
                    Self::NotFound
                }
            }
        }
    }

    /// 获取路由对应的 URL path（含 query）
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Search { q } => {
                if q.is_empty() {
                    "/search".to_string()
                } else {
                    format!("/search?q={}", encode_component(q))
                }
            }
            Self::GameDetail { id } => format!("/game/{id}"),
            Self::Library => "/library".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Auth => "/auth".to_string(),
            Self::Admin(section) => {
                let seg = section.segment();
                if seg.is_empty() {
                    "/admin".to_string()
                } else {
                    format!("/admin/{seg}")
                }
            }
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要登录**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Library | Self::Profile | Self::Admin(_))
    }

    /// 定义该路由是否需要管理员身份
    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    /// 定义已登录用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Auth)
    }

    /// 未登录访问受保护页面时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Auth
    }

    /// 非管理员访问后台时的重定向目标
    pub fn admin_failure_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// URL 编解码
// =========================================================

/// 百分号编码（RFC 3986 未保留字符之外全部转义）
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}

/// 百分号解码；非法转义序列原样保留
pub fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 3 <= bytes.len() => {
                if let Some(hex) = s.get(i + 1..i + 3)
                    && let Ok(byte) = u8::from_str_radix(hex, 16)
                {
                    out.push(byte);
                    i += 3;
                    continue;
                }
                out.push(b'%');
                i += 1;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| s.to_string())
}

/// 从 query string（不含 `?`）中取出指定参数并解码
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (k == key).then(|| decode_component(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_public_routes() {
        assert_eq!(AppRoute::from_location("/", ""), AppRoute::Home);
        assert_eq!(
            AppRoute::from_location("/game/42", ""),
            AppRoute::GameDetail { id: 42 }
        );
        assert_eq!(AppRoute::from_location("/game/abc", ""), AppRoute::NotFound);
        assert_eq!(AppRoute::from_location("/auth", ""), AppRoute::Auth);
        assert_eq!(AppRoute::from_location("/nope", ""), AppRoute::NotFound);
    }

    #[test]
    fn parses_search_keyword_from_query() {
        assert_eq!(
            AppRoute::from_location("/search", "?q=galgame"),
            AppRoute::Search {
                q: "galgame".to_string()
            }
        );
        assert_eq!(
            AppRoute::from_location("/search", ""),
            AppRoute::Search { q: String::new() }
        );
    }

    #[test]
    fn parses_admin_sections() {
        assert_eq!(
            AppRoute::from_location("/admin", ""),
            AppRoute::Admin(AdminSection::Dashboard)
        );
        assert_eq!(
            AppRoute::from_location("/admin/vip-codes", ""),
            AppRoute::Admin(AdminSection::VipCodes)
        );
        assert_eq!(AppRoute::from_location("/admin/wat", ""), AppRoute::NotFound);
    }

    #[test]
    fn guards_cover_gated_routes() {
        assert!(AppRoute::Library.requires_auth());
        assert!(AppRoute::Profile.requires_auth());
        assert!(AppRoute::Admin(AdminSection::Users).requires_auth());
        assert!(AppRoute::Admin(AdminSection::Users).requires_admin());
        assert!(!AppRoute::Library.requires_admin());
        assert!(!AppRoute::Home.requires_auth());
        assert!(AppRoute::Auth.should_redirect_when_authenticated());
    }

    #[test]
    fn path_round_trips_with_encoded_keyword() {
        let route = AppRoute::Search {
            q: "东方 project".to_string(),
        };
        let path = route.to_path();
        assert_eq!(path, "/search?q=%E4%B8%9C%E6%96%B9%20project");
        let (p, q) = path.split_once('?').unwrap();
        assert_eq!(AppRoute::from_location(p, q), route);
    }

    #[test]
    fn percent_codec_handles_multibyte_and_plus() {
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(decode_component("a+b"), "a b");
        assert_eq!(decode_component(&encode_component("测试/&?")), "测试/&?");
        assert_eq!(decode_component("%zz"), "%zz");
    }

    #[test]
    fn query_param_picks_the_right_pair() {
        assert_eq!(
            query_param("?page=2&q=%E6%B8%B8%E6%88%8F", "q").as_deref(),
            Some("游戏")
        );
        assert_eq!(query_param("a=1", "q"), None);
    }
}
