// Settings Store
// Typed facade over the untyped key-value backend

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    AppLocale, ColorMode, ReceiveHistoryEntry, SecurityContext, SendMode, ThemeMode,
    WindowDimensions, WindowPosition, WindowSize,
};
use crate::services::{
    AliasGenerator, FileKvStore, IdentityGenerator, KvStore, LocaleCatalog, Platform,
    PlatformOracle,
};

/// Current on-disk schema marker. Written once; future schema changes branch
/// on it during initialization.
pub const STORE_VERSION: i64 = 1;

pub const DEFAULT_PORT: u16 = 53317;
pub const DEFAULT_MULTICAST_GROUP: &str = "224.0.0.167";

/// Flat key namespace of the backing store.
pub mod keys {
    pub const VERSION: &str = "ls_version";
    pub const SHOW_TOKEN: &str = "ls_show_token";
    pub const ALIAS: &str = "ls_alias";
    pub const THEME: &str = "ls_theme";
    pub const COLOR: &str = "ls_color";
    pub const LOCALE: &str = "ls_locale";
    pub const PORT: &str = "ls_port";
    pub const MULTICAST_GROUP: &str = "ls_multicast_group";
    pub const DESTINATION: &str = "ls_destination";
    pub const HTTPS: &str = "ls_https";
    pub const SEND_MODE: &str = "ls_send_mode";
    pub const SAVE_TO_GALLERY: &str = "ls_save_to_gallery";
    pub const QUICK_SAVE: &str = "ls_quick_save";
    pub const MINIMIZE_TO_TRAY: &str = "ls_minimize_to_tray";
    pub const LAUNCH_AT_STARTUP: &str = "ls_launch_at_startup";
    pub const AUTO_START_LAUNCH_MINIMIZED: &str = "ls_auto_start_launch_minimized";
    pub const SAVE_WINDOW_PLACEMENT: &str = "ls_save_window_placement";
    pub const WINDOW_WIDTH: &str = "ls_window_width";
    pub const WINDOW_HEIGHT: &str = "ls_window_height";
    pub const WINDOW_OFFSET_X: &str = "ls_window_offset_x";
    pub const WINDOW_OFFSET_Y: &str = "ls_window_offset_y";
    pub const SECURITY_CONTEXT: &str = "ls_security_context";
    pub const RECEIVE_HISTORY: &str = "ls_receive_history";

    pub const ALL: &[&str] = &[
        VERSION,
        SHOW_TOKEN,
        ALIAS,
        THEME,
        COLOR,
        LOCALE,
        PORT,
        MULTICAST_GROUP,
        DESTINATION,
        HTTPS,
        SEND_MODE,
        SAVE_TO_GALLERY,
        QUICK_SAVE,
        MINIMIZE_TO_TRAY,
        LAUNCH_AT_STARTUP,
        AUTO_START_LAUNCH_MINIMIZED,
        SAVE_WINDOW_PLACEMENT,
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
        WINDOW_OFFSET_X,
        WINDOW_OFFSET_Y,
        SECURITY_CONTEXT,
        RECEIVE_HISTORY,
    ];
}

/// Errors surfaced by the settings store
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The backend could not be opened, even after the one-shot recovery.
    /// Fatal; startup cannot continue without settings.
    #[error("settings store unavailable: {0}")]
    StoreUnavailable(#[source] io::Error),

    /// A JSON-encoded record failed to encode or decode. Surfaced per call;
    /// never silently replaced with a default, since that would mask data
    /// loss.
    #[error("malformed record at {key}: {source}")]
    MalformedRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A durable write failed after the store was opened.
    #[error("settings write failed: {0}")]
    Backend(#[source] io::Error),
}

/// External collaborators consumed through narrow interfaces.
pub struct Collaborators {
    pub platform: Arc<dyn PlatformOracle>,
    pub locales: Arc<dyn LocaleCatalog>,
    pub alias: Arc<dyn AliasGenerator>,
    pub identity: Arc<dyn IdentityGenerator>,
}

impl Collaborators {
    /// Production wiring: host platform oracle, device locale catalog, and
    /// the word-list/random generators.
    pub fn host() -> Self {
        use crate::services::{
            DeviceLocaleCatalog, HostPlatform, RandomIdentityGenerator, WordlistAliasGenerator,
        };

        let locales: Arc<dyn LocaleCatalog> = Arc::new(DeviceLocaleCatalog::new());
        Self {
            platform: Arc::new(HostPlatform),
            alias: Arc::new(WordlistAliasGenerator::new(locales.clone())),
            identity: Arc::new(RandomIdentityGenerator),
            locales,
        }
    }
}

/// Typed settings facade. Constructed once at startup via [`initialize`]
/// (or [`bootstrap`] over an already-open backend) and shared by handle;
/// holds no cache, so every read re-queries the backend.
///
/// [`initialize`]: SettingsStore::initialize
/// [`bootstrap`]: SettingsStore::bootstrap
pub struct SettingsStore {
    store: Box<dyn KvStore>,
    platform: Arc<dyn PlatformOracle>,
    alias_gen: Arc<dyn AliasGenerator>,
}

impl SettingsStore {
    /// Open the file-backed store at `path` and bootstrap it.
    ///
    /// If the open fails on Windows the backing file is deleted and the open
    /// retried once; the platform's store file is known to turn up corrupt
    /// there. Anywhere else, or if the retry fails too, initialization fails
    /// with [`SettingsError::StoreUnavailable`]. Must not run concurrently
    /// with another initialization attempt.
    pub async fn initialize(
        path: impl Into<PathBuf>,
        collaborators: Collaborators,
    ) -> Result<Self, SettingsError> {
        let path = path.into();

        let store = match FileKvStore::open(&path).await {
            Ok(store) => store,
            Err(open_err) if collaborators.platform.is_platform(&[Platform::Windows]) => {
                log::warn!(
                    "Settings store at {:?} failed to open ({open_err}); deleting and retrying once",
                    path
                );
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(SettingsError::StoreUnavailable(e)),
                }
                FileKvStore::open(&path)
                    .await
                    .map_err(SettingsError::StoreUnavailable)?
            }
            Err(open_err) => return Err(SettingsError::StoreUnavailable(open_err)),
        };

        Self::bootstrap(Box::new(store), collaborators).await
    }

    /// Bootstrap over an already-open backend: resolve the locale, seed
    /// one-time defaults, and return the facade. Idempotent; every seed is
    /// guarded by "only if absent".
    pub async fn bootstrap(
        store: Box<dyn KvStore>,
        collaborators: Collaborators,
    ) -> Result<Self, SettingsError> {
        let Collaborators {
            platform,
            locales,
            alias,
            identity,
        } = collaborators;

        // The locale must be applied before the alias seed below: alias
        // generation draws on the active locale's word lists.
        let stored_locale = store
            .get_string(keys::LOCALE)
            .and_then(|tag| AppLocale::from_language_tag(&tag));
        match stored_locale {
            Some(locale) => locales.set_locale_raw(locale),
            None => locales.use_device_locale(),
        }

        if store.get_int(keys::VERSION).is_none() {
            store
                .set_int(keys::VERSION, STORE_VERSION)
                .await
                .map_err(SettingsError::Backend)?;
        }

        if store.get_string(keys::SHOW_TOKEN).is_none() {
            store
                .set_string(keys::SHOW_TOKEN, &Uuid::new_v4().to_string())
                .await
                .map_err(SettingsError::Backend)?;
        }

        if store.get_string(keys::ALIAS).is_none() {
            store
                .set_string(keys::ALIAS, &alias.generate())
                .await
                .map_err(SettingsError::Backend)?;
        }

        if store.get_string(keys::SECURITY_CONTEXT).is_none() {
            let context = identity.generate();
            let encoded = context.to_json().map_err(|source| SettingsError::MalformedRecord {
                key: keys::SECURITY_CONTEXT.to_string(),
                source,
            })?;
            store
                .set_string(keys::SECURITY_CONTEXT, &encoded)
                .await
                .map_err(SettingsError::Backend)?;
        }

        if store.get_string(keys::COLOR).is_none() {
            let default = default_color_mode(platform.as_ref());
            store
                .set_string(keys::COLOR, default.as_name())
                .await
                .map_err(SettingsError::Backend)?;
        }

        log::info!("Settings store initialized");

        Ok(Self {
            store,
            platform,
            alias_gen: alias,
        })
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Display name. Seeded at initialization; if the stored value has been
    /// wiped a fresh name is generated for the caller without being
    /// persisted.
    pub fn alias(&self) -> String {
        self.store
            .get_string(keys::ALIAS)
            .unwrap_or_else(|| self.alias_gen.generate())
    }

    pub async fn set_alias(&self, alias: &str) -> Result<(), SettingsError> {
        self.set_string(keys::ALIAS, alias).await
    }

    /// Stable random identifier generated once at first initialization.
    /// Guaranteed present afterwards, so this read is non-optional.
    pub fn show_token(&self) -> String {
        self.store
            .get_string(keys::SHOW_TOKEN)
            .expect("show token is seeded during initialization")
    }

    // =========================================================================
    // Appearance
    // =========================================================================

    pub fn theme(&self) -> ThemeMode {
        self.enum_setting(keys::THEME, ThemeMode::from_name, ThemeMode::System)
    }

    pub async fn set_theme(&self, theme: ThemeMode) -> Result<(), SettingsError> {
        self.set_string(keys::THEME, theme.as_name()).await
    }

    pub fn color_mode(&self) -> ColorMode {
        let default = default_color_mode(self.platform.as_ref());
        self.enum_setting(keys::COLOR, ColorMode::from_name, default)
    }

    pub async fn set_color_mode(&self, color: ColorMode) -> Result<(), SettingsError> {
        self.set_string(keys::COLOR, color.as_name()).await
    }

    /// Selected interface language. `None` means "follow the device locale".
    pub fn locale(&self) -> Option<AppLocale> {
        let raw = self.store.get_string(keys::LOCALE)?;
        let locale = AppLocale::from_language_tag(&raw);
        if locale.is_none() {
            log::warn!("Unrecognized stored locale {raw:?}; following the device locale");
        }
        locale
    }

    /// `None` removes the key, preserving "absent = follow device".
    pub async fn set_locale(&self, locale: Option<AppLocale>) -> Result<(), SettingsError> {
        match locale {
            Some(locale) => self.set_string(keys::LOCALE, locale.language_tag()).await,
            None => self.remove(keys::LOCALE).await,
        }
    }

    // =========================================================================
    // Network
    // =========================================================================

    pub fn port(&self) -> u16 {
        match self.store.get_int(keys::PORT) {
            None => DEFAULT_PORT,
            Some(raw) => u16::try_from(raw).unwrap_or_else(|_| {
                log::warn!("Stored port {raw} is out of range; using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
        }
    }

    pub async fn set_port(&self, port: u16) -> Result<(), SettingsError> {
        self.set_int(keys::PORT, i64::from(port)).await
    }

    pub fn multicast_group(&self) -> String {
        self.store
            .get_string(keys::MULTICAST_GROUP)
            .unwrap_or_else(|| DEFAULT_MULTICAST_GROUP.to_string())
    }

    pub async fn set_multicast_group(&self, group: &str) -> Result<(), SettingsError> {
        self.set_string(keys::MULTICAST_GROUP, group).await
    }

    /// Fixed destination address for sends, if one is pinned.
    pub fn destination(&self) -> Option<String> {
        self.store.get_string(keys::DESTINATION)
    }

    pub async fn set_destination(&self, destination: Option<&str>) -> Result<(), SettingsError> {
        match destination {
            Some(destination) => self.set_string(keys::DESTINATION, destination).await,
            None => self.remove(keys::DESTINATION).await,
        }
    }

    pub fn https(&self) -> bool {
        self.store.get_bool(keys::HTTPS).unwrap_or(true)
    }

    pub async fn set_https(&self, https: bool) -> Result<(), SettingsError> {
        self.set_bool(keys::HTTPS, https).await
    }

    pub fn send_mode(&self) -> SendMode {
        self.enum_setting(keys::SEND_MODE, SendMode::from_name, SendMode::Single)
    }

    pub async fn set_send_mode(&self, mode: SendMode) -> Result<(), SettingsError> {
        self.set_string(keys::SEND_MODE, mode.as_name()).await
    }

    // =========================================================================
    // Behavior
    // =========================================================================

    pub fn save_to_gallery(&self) -> bool {
        self.store.get_bool(keys::SAVE_TO_GALLERY).unwrap_or(true)
    }

    pub async fn set_save_to_gallery(&self, enabled: bool) -> Result<(), SettingsError> {
        self.set_bool(keys::SAVE_TO_GALLERY, enabled).await
    }

    pub fn quick_save(&self) -> bool {
        self.store.get_bool(keys::QUICK_SAVE).unwrap_or(false)
    }

    pub async fn set_quick_save(&self, enabled: bool) -> Result<(), SettingsError> {
        self.set_bool(keys::QUICK_SAVE, enabled).await
    }

    pub fn minimize_to_tray(&self) -> bool {
        self.store.get_bool(keys::MINIMIZE_TO_TRAY).unwrap_or(false)
    }

    pub async fn set_minimize_to_tray(&self, enabled: bool) -> Result<(), SettingsError> {
        self.set_bool(keys::MINIMIZE_TO_TRAY, enabled).await
    }

    pub fn launch_at_startup(&self) -> bool {
        self.store.get_bool(keys::LAUNCH_AT_STARTUP).unwrap_or(false)
    }

    pub async fn set_launch_at_startup(&self, enabled: bool) -> Result<(), SettingsError> {
        self.set_bool(keys::LAUNCH_AT_STARTUP, enabled).await
    }

    pub fn auto_start_launch_minimized(&self) -> bool {
        self.store
            .get_bool(keys::AUTO_START_LAUNCH_MINIMIZED)
            .unwrap_or(true)
    }

    pub async fn set_auto_start_launch_minimized(&self, enabled: bool) -> Result<(), SettingsError> {
        self.set_bool(keys::AUTO_START_LAUNCH_MINIMIZED, enabled).await
    }

    // =========================================================================
    // Window placement
    // =========================================================================

    /// Whether window placement should be persisted. On Wayland desktops the
    /// stored flag is ignored (not overwritten) and this always returns
    /// `false`: the session cannot report geometry reliably.
    pub fn save_window_placement(&self) -> bool {
        if !self.platform.is_not_wayland_desktop() {
            return false;
        }
        self.store.get_bool(keys::SAVE_WINDOW_PLACEMENT).unwrap_or(true)
    }

    pub async fn set_save_window_placement(&self, enabled: bool) -> Result<(), SettingsError> {
        self.set_bool(keys::SAVE_WINDOW_PLACEMENT, enabled).await
    }

    /// Combine the four stored geometry fields. A size is produced only when
    /// both width and height are present, a position only when both offsets
    /// are; partial data yields `None` rather than a guess.
    pub fn window_last_dimensions(&self) -> WindowDimensions {
        let width = self.store.get_double(keys::WINDOW_WIDTH);
        let height = self.store.get_double(keys::WINDOW_HEIGHT);
        let offset_x = self.store.get_double(keys::WINDOW_OFFSET_X);
        let offset_y = self.store.get_double(keys::WINDOW_OFFSET_Y);

        WindowDimensions {
            size: width.zip(height).map(|(width, height)| WindowSize { width, height }),
            position: offset_x.zip(offset_y).map(|(x, y)| WindowPosition { x, y }),
        }
    }

    // The four geometry setters are independent; callers wanting a combined
    // read must write width+height and offset-x+offset-y as matched pairs.

    pub async fn set_window_width(&self, width: f64) -> Result<(), SettingsError> {
        self.set_double(keys::WINDOW_WIDTH, width).await
    }

    pub async fn set_window_height(&self, height: f64) -> Result<(), SettingsError> {
        self.set_double(keys::WINDOW_HEIGHT, height).await
    }

    pub async fn set_window_offset_x(&self, offset_x: f64) -> Result<(), SettingsError> {
        self.set_double(keys::WINDOW_OFFSET_X, offset_x).await
    }

    pub async fn set_window_offset_y(&self, offset_y: f64) -> Result<(), SettingsError> {
        self.set_double(keys::WINDOW_OFFSET_Y, offset_y).await
    }

    // =========================================================================
    // Structured records
    // =========================================================================

    /// Whole-record read of the security context. Callers needing to change
    /// a field must read-modify-write the full record.
    pub fn security_context(&self) -> Result<SecurityContext, SettingsError> {
        let raw = self
            .store
            .get_string(keys::SECURITY_CONTEXT)
            .expect("security context is seeded during initialization");
        SecurityContext::from_json(&raw).map_err(|source| SettingsError::MalformedRecord {
            key: keys::SECURITY_CONTEXT.to_string(),
            source,
        })
    }

    pub async fn set_security_context(&self, context: &SecurityContext) -> Result<(), SettingsError> {
        let encoded = context.to_json().map_err(|source| SettingsError::MalformedRecord {
            key: keys::SECURITY_CONTEXT.to_string(),
            source,
        })?;
        self.set_string(keys::SECURITY_CONTEXT, &encoded).await
    }

    /// Decode the stored history, each element independently. A malformed
    /// element fails the call naming that element; it is never dropped
    /// silently.
    pub fn receive_history(&self) -> Result<Vec<ReceiveHistoryEntry>, SettingsError> {
        let Some(raw) = self.store.get_string_list(keys::RECEIVE_HISTORY) else {
            return Ok(Vec::new());
        };

        raw.iter()
            .enumerate()
            .map(|(index, encoded)| {
                ReceiveHistoryEntry::from_json(encoded).map_err(|source| {
                    SettingsError::MalformedRecord {
                        key: format!("{}[{index}]", keys::RECEIVE_HISTORY),
                        source,
                    }
                })
            })
            .collect()
    }

    /// Replace the whole history in one backend call. There is no append
    /// primitive; replacement is always whole-list.
    pub async fn set_receive_history(
        &self,
        entries: &[ReceiveHistoryEntry],
    ) -> Result<(), SettingsError> {
        let mut encoded = Vec::with_capacity(entries.len());
        for entry in entries {
            encoded.push(entry.to_json().map_err(|source| SettingsError::MalformedRecord {
                key: keys::RECEIVE_HISTORY.to_string(),
                source,
            })?);
        }
        self.store
            .set_string_list(keys::RECEIVE_HISTORY, &encoded)
            .await
            .map_err(SettingsError::Backend)
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Remove every settings key. One-time seeds come back on the next
    /// initialization, not here.
    pub async fn clear(&self) -> Result<(), SettingsError> {
        for key in keys::ALL {
            self.remove(key).await?;
        }
        log::info!("Settings store cleared");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn enum_setting<T: Copy>(
        &self,
        key: &'static str,
        parse: fn(&str) -> Option<T>,
        default: T,
    ) -> T {
        match self.store.get_string(key) {
            None => default,
            Some(raw) => parse(&raw).unwrap_or_else(|| {
                log::warn!("Unrecognized stored value {raw:?} for {key}; using the default");
                default
            }),
        }
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.store
            .set_string(key, value)
            .await
            .map_err(SettingsError::Backend)
    }

    async fn set_int(&self, key: &str, value: i64) -> Result<(), SettingsError> {
        self.store.set_int(key, value).await.map_err(SettingsError::Backend)
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), SettingsError> {
        self.store.set_bool(key, value).await.map_err(SettingsError::Backend)
    }

    async fn set_double(&self, key: &str, value: f64) -> Result<(), SettingsError> {
        self.store
            .set_double(key, value)
            .await
            .map_err(SettingsError::Backend)
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.store.remove(key).await.map_err(SettingsError::Backend)
    }
}

fn default_color_mode(platform: &dyn PlatformOracle) -> ColorMode {
    if platform.is_platform(&[Platform::Android]) {
        ColorMode::System
    } else {
        ColorMode::Localsend
    }
}
