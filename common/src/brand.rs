//! ブランド名の除去
//!
//! 「大众高尔夫」のようにブランド+車系で入力された検索語から、既知のブランド名を
//! 取り除いて車系だけの列にも一致させる。リストに無いブランドはそのまま残る。

use crate::normalize::fold_case;

/// 既知のブランド名
pub const KNOWN_BRANDS: &[&str] = &[
    "一汽大众", "上汽大众", "广汽丰田", "一汽丰田", "东风日产", "广汽本田", "东风本田",
    "上汽通用", "长安福特", "华晨宝马", "北京奔驰", "一汽奥迪",
    "大众", "丰田", "本田", "日产", "别克", "雪佛兰", "福特", "奥迪", "宝马", "奔驰",
    "现代", "起亚", "马自达", "三菱", "斯柯达", "标致", "雪铁龙", "斯巴鲁", "铃木",
    "雷克萨斯", "英菲尼迪", "讴歌", "凯迪拉克", "林肯", "沃尔沃", "路虎", "捷豹",
    "保时捷", "特斯拉", "吉利", "长城", "哈弗", "比亚迪", "奇瑞", "长安", "荣威",
    "名爵", "传祺", "五菱", "宝骏", "领克", "红旗", "蔚来", "小鹏", "理想",
    "Jeep", "MINI", "Smart",
];

/// ブランド除去の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedTerm {
    /// 照合に使う語
    pub term: String,
    /// 取り除いたブランド（除去しなかった場合は None）
    pub brand: Option<&'static str>,
}

/// 正規化済みの検索語から既知ブランドを取り除く
///
/// 最長一致のブランドを1回だけ除去する。除去した結果が空になる場合は元の語を使う。
pub fn strip_brand(term: &str) -> StrippedTerm {
    let mut best: Option<(&'static str, String)> = None;
    for &brand in KNOWN_BRANDS {
        let folded = fold_case(brand);
        if term.contains(folded.as_str())
            && best.as_ref().map_or(true, |(_, b)| folded.chars().count() > b.chars().count())
        {
            best = Some((brand, folded));
        }
    }

    if let Some((brand, folded)) = best {
        let stripped = term.replacen(folded.as_str(), "", 1);
        let stripped = stripped.trim();
        if !stripped.is_empty() {
            return StrippedTerm {
                term: stripped.to_string(),
                brand: Some(brand),
            };
        }
    }

    StrippedTerm {
        term: term.to_string(),
        brand: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix() {
        let stripped = strip_brand("大众高尔夫");
        assert_eq!(stripped.term, "高尔夫");
        assert_eq!(stripped.brand, Some("大众"));
    }

    #[test]
    fn test_strip_longest_brand() {
        let stripped = strip_brand("一汽大众 速腾");
        assert_eq!(stripped.term, "速腾");
        assert_eq!(stripped.brand, Some("一汽大众"));
    }

    #[test]
    fn test_strip_latin_brand() {
        let stripped = strip_brand("jeep 牧马人");
        assert_eq!(stripped.term, "牧马人");
        assert_eq!(stripped.brand, Some("Jeep"));
    }

    #[test]
    fn test_brand_only_keeps_original() {
        let stripped = strip_brand("丰田");
        assert_eq!(stripped.term, "丰田");
        assert_eq!(stripped.brand, None);
    }

    #[test]
    fn test_unknown_brand_untouched() {
        let stripped = strip_brand("阿尔法罗密欧朱丽叶");
        assert_eq!(stripped.term, "阿尔法罗密欧朱丽叶");
        assert_eq!(stripped.brand, None);
    }
}
