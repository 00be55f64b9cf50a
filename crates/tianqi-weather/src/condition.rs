use serde::{Deserialize, Serialize};

/// Marks a change of weather within one day, as in `多云转晴`
pub const TRANSITION_MARKER: char = '转';

/// Weather icons keyed by the API's Chinese weather-type descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    BaoXue,
    BaoYu,
    BaoYuDaoDaBaoYu,
    DaBaoYu,
    DaBaoYuDaoTeDaBaoYu,
    DaDaoBaoXue,
    DaXue,
    DaYu,
    DongYu,
    DuoYun,
    FuChen,
    LeiZhenYu,
    LeiZhenYuBanYouBingBao,
    Mai,
    QiangShaChenBao,
    Qing,
    ShaChenBao,
    TeDaBaoYu,
    Wu,
    XiaoDaoZhongXue,
    XiaoDaoZhongYu,
    XiaoXue,
    XiaoYu,
    Xue,
    YangSha,
    Yin,
    Yu,
    YuJiaXue,
    ZhenXue,
    ZhenYu,
    ZhongDaoDaXue,
    ZhongDaoDaYu,
    ZhongXue,
    ZhongYu,
    #[default]
    Undefined,
}

impl WeatherIcon {
    /// Exact lookup of a single weather-type description
    pub fn from_description(description: &str) -> Option<Self> {
        let icon = match description {
            "暴雪" => Self::BaoXue,
            "暴雨" => Self::BaoYu,
            "暴雨到大暴雨" => Self::BaoYuDaoDaBaoYu,
            "大暴雨" => Self::DaBaoYu,
            "大暴雨到特大暴雨" => Self::DaBaoYuDaoTeDaBaoYu,
            "大到暴雪" => Self::DaDaoBaoXue,
            "大雪" => Self::DaXue,
            "大雨" => Self::DaYu,
            "冻雨" => Self::DongYu,
            "多云" => Self::DuoYun,
            "浮尘" | "浮沉" => Self::FuChen,
            "雷阵雨" => Self::LeiZhenYu,
            "雷阵雨伴有冰雹" => Self::LeiZhenYuBanYouBingBao,
            "霾" => Self::Mai,
            "强沙尘暴" => Self::QiangShaChenBao,
            "晴" => Self::Qing,
            "沙尘暴" => Self::ShaChenBao,
            "特大暴雨" => Self::TeDaBaoYu,
            "雾" => Self::Wu,
            "小到中雪" => Self::XiaoDaoZhongXue,
            "小到中雨" => Self::XiaoDaoZhongYu,
            "小雪" => Self::XiaoXue,
            "小雨" => Self::XiaoYu,
            "雪" => Self::Xue,
            "扬沙" => Self::YangSha,
            "阴" => Self::Yin,
            "雨" => Self::Yu,
            "雨夹雪" => Self::YuJiaXue,
            "阵雪" => Self::ZhenXue,
            "阵雨" => Self::ZhenYu,
            "中到大雪" => Self::ZhongDaoDaXue,
            "中到大雨" => Self::ZhongDaoDaYu,
            "中雪" => Self::ZhongXue,
            "中雨" => Self::ZhongYu,
            "undefined" => Self::Undefined,
            _ => return None,
        };
        Some(icon)
    }

    /// Pick the icon for a weather-type string.
    ///
    /// For `A转B` the state after the last marker is tried first, then the
    /// whole string, then the state before the first marker. Anything that
    /// still doesn't match is `Undefined`.
    pub fn resolve(weather_type: &str) -> Self {
        let after = weather_type.rsplit_once(TRANSITION_MARKER).map(|(_, b)| b);
        let before = weather_type.split_once(TRANSITION_MARKER).map(|(a, _)| a);

        after
            .into_iter()
            .chain(std::iter::once(weather_type))
            .chain(before)
            .find_map(Self::from_description)
            .unwrap_or(Self::Undefined)
    }

    /// Icon asset file name, e.g. `Qing.png`
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::BaoXue => "BaoXue.png",
            Self::BaoYu => "BaoYu.png",
            Self::BaoYuDaoDaBaoYu => "BaoYuDaoDaBaoYu.png",
            Self::DaBaoYu => "DaBaoYu.png",
            Self::DaBaoYuDaoTeDaBaoYu => "DaBaoYuDaoTeDaBaoYu.png",
            Self::DaDaoBaoXue => "DaDaoBaoXue.png",
            Self::DaXue => "DaXue.png",
            Self::DaYu => "DaYu.png",
            Self::DongYu => "DongYu.png",
            Self::DuoYun => "DuoYun.png",
            Self::FuChen => "FuChen.png",
            Self::LeiZhenYu => "LeiZhenYu.png",
            Self::LeiZhenYuBanYouBingBao => "LeiZhenYuBanYouBingBao.png",
            Self::Mai => "Mai.png",
            Self::QiangShaChenBao => "QiangShaChenBao.png",
            Self::Qing => "Qing.png",
            Self::ShaChenBao => "ShaChenBao.png",
            Self::TeDaBaoYu => "TeDaBaoYu.png",
            Self::Wu => "Wu.png",
            Self::XiaoDaoZhongXue => "XiaoDaoZhongXue.png",
            Self::XiaoDaoZhongYu => "XiaoDaoZhongYu.png",
            Self::XiaoXue => "XiaoXue.png",
            Self::XiaoYu => "XiaoYu.png",
            Self::Xue => "Xue.png",
            Self::YangSha => "YangSha.png",
            Self::Yin => "Yin.png",
            Self::Yu => "Yu.png",
            Self::YuJiaXue => "YuJiaXue.png",
            Self::ZhenXue => "ZhenXue.png",
            Self::ZhenYu => "ZhenYu.png",
            Self::ZhongDaoDaXue => "ZhongDaoDaXue.png",
            Self::ZhongDaoDaYu => "ZhongDaoDaYu.png",
            Self::ZhongXue => "ZhongXue.png",
            Self::ZhongYu => "ZhongYu.png",
            Self::Undefined => "undefined.png",
        }
    }
}

/// RGB colour triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Air quality severity buckets used for label styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirQuality {
    Excellent,
    Good,
    Light,
    Moderate,
    Heavy,
}

impl AirQuality {
    /// Exact match against the API's `air_level` values; anything else is unstyled
    pub fn classify(level: &str) -> Option<Self> {
        match level {
            "优" => Some(Self::Excellent),
            "良" => Some(Self::Good),
            "轻度" => Some(Self::Light),
            "中度" => Some(Self::Moderate),
            "重度" => Some(Self::Heavy),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "优",
            Self::Good => "良",
            Self::Light => "轻度",
            Self::Moderate => "中度",
            Self::Heavy => "重度",
        }
    }

    pub fn background(&self) -> Rgb {
        match self {
            Self::Excellent => Rgb(150, 213, 32),
            Self::Good => Rgb(255, 170, 127),
            Self::Light => Rgb(255, 199, 199),
            Self::Moderate => Rgb(255, 17, 17),
            Self::Heavy => Rgb(153, 0, 0),
        }
    }

    pub fn foreground(&self) -> Rgb {
        Rgb(255, 255, 255)
    }
}
