//! Dictionary composition operations
//!
//! These free functions implement the composition modes of the dictionary
//! pipeline: merging, inversion, chaining, placeholder expansion, and
//! filtering. They all produce a fresh [`Table`].

use regex::Regex;

use crate::dict::{Dict, Dictionary, Table};
use crate::error::{Error, Result};
use crate::unicode::segment;

/// Value-removal strategy for [`filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMethod {
    /// Drop every key present in the removal dictionaries.
    #[default]
    RemoveKeys,
    /// Drop only the listed values of each key.
    RemoveKeyValues,
}

impl FilterMethod {
    /// Parses the config spelling of a method name.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "remove_keys" => Ok(FilterMethod::RemoveKeys),
            "remove_key_values" => Ok(FilterMethod::RemoveKeyValues),
            _ => Err(Error::Config(format!("unknown filter method: {name}"))),
        }
    }
}

/// Unions `sources` in order; colliding keys accumulate values.
pub fn load<I>(sources: I) -> Table
where
    I: IntoIterator<Item = Dictionary>,
{
    let mut out = Table::new();
    for dict in sources {
        for (key, values) in dict.entries() {
            out.add(key, values, false);
        }
    }
    out
}

/// Inverts a dictionary: every value becomes a key mapping back to its key.
pub fn swap(dict: &Dictionary) -> Table {
    let mut out = Table::new();
    for (key, values) in dict.entries() {
        for value in values {
            out.add(value, [key.clone()], false);
        }
    }
    out
}

/// Greedy longest-match conversion taking the first value of each hit.
fn convert_default(dict: &dyn Dict, text: &str) -> String {
    let units = segment(text);
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while pos < units.len() {
        match dict.match_at(&units, pos) {
            Some(m) => {
                out.push_str(&m.values[0]);
                pos = m.end;
            }
            None => {
                out.push_str(units[pos]);
                pos += 1;
            }
        }
    }
    out
}

/// Enumerates the distinct conversion forms of `text`.
///
/// Walks the unit sequence depth-first, branching on each value of the
/// longest match. `include_self` also keeps the unchanged span at each
/// match; `include_short` additionally explores shorter matches at the same
/// position and the one-unit advance past a multi-unit match. Only forms
/// that used at least one match survive; when none do, `text` itself is
/// returned.
pub(crate) fn apply_enum(
    dict: &dyn Dict,
    text: &str,
    include_short: bool,
    include_self: bool,
) -> Vec<String> {
    let units = segment(text);
    let mut out = Vec::new();
    enum_rec(
        dict,
        &units,
        0,
        "",
        false,
        include_short,
        include_self,
        &mut out,
    );
    if out.is_empty() {
        out.push(text.to_string());
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn enum_rec(
    dict: &dyn Dict,
    units: &[&str],
    pos: usize,
    acc: &str,
    matched: bool,
    include_short: bool,
    include_self: bool,
    out: &mut Vec<String>,
) {
    if pos == units.len() {
        if matched && !out.iter().any(|s| s == acc) {
            out.push(acc.to_string());
        }
        return;
    }
    let Some(m) = dict.match_at(units, pos) else {
        let next = format!("{acc}{}", units[pos]);
        enum_rec(
            dict,
            units,
            pos + 1,
            &next,
            matched,
            include_short,
            include_self,
            out,
        );
        return;
    };
    for value in m.values {
        let next = format!("{acc}{value}");
        enum_rec(
            dict,
            units,
            m.end,
            &next,
            true,
            include_short,
            include_self,
            out,
        );
    }
    if include_self {
        let next = format!("{acc}{}", units[pos..m.end].concat());
        enum_rec(
            dict,
            units,
            m.end,
            &next,
            true,
            include_short,
            include_self,
            out,
        );
    }
    if include_short {
        for end in (pos + 1..m.end).rev() {
            let Some(shorter) = dict.match_exact(units, pos, end - pos) else {
                continue;
            };
            for value in shorter.values {
                let next = format!("{acc}{value}");
                enum_rec(
                    dict,
                    units,
                    end,
                    &next,
                    true,
                    include_short,
                    include_self,
                    out,
                );
            }
            if include_self {
                let next = format!("{acc}{}", units[pos..end].concat());
                enum_rec(
                    dict,
                    units,
                    end,
                    &next,
                    true,
                    include_short,
                    include_self,
                    out,
                );
            }
        }
        if m.end - pos > 1 {
            let next = format!("{acc}{}", units[pos]);
            enum_rec(
                dict,
                units,
                pos + 1,
                &next,
                matched,
                include_short,
                include_self,
                out,
            );
        }
    }
}

/// Chains two dictionaries so that converting with the result equals
/// converting with `d1` then `d2`.
///
/// Values of `d1` are rewritten through `d2`, `d2`'s own entries are merged
/// in, and every spelling that `d1` could turn into a `d2` key gets that
/// key's values. A pre-image keeps itself as the leading value when `d1`
/// would not otherwise reach the `d2` key from it.
pub fn join(d1: &Dictionary, d2: &Dictionary) -> Table {
    let mut out = Table::new();
    for (key, values) in d1.entries() {
        let converted: Vec<String> = values
            .iter()
            .flat_map(|v| apply_enum(d2, v, false, false))
            .collect();
        out.add(key, converted, false);
    }
    for (key, values) in d2.entries() {
        out.add(key, values, false);
    }
    let inverted = Dictionary::Table(swap(d1));
    for (key, values) in d2.entries() {
        for form in apply_enum(&inverted, &key, true, true) {
            if form != key && convert_default(d1, &form) != key && out.get(&form).is_none() {
                out.add(form.clone(), [form.clone()], false);
            }
            out.add(form, values.clone(), false);
        }
    }
    out
}

/// One placeholder occurrence scan: positions where `needle` appears as a
/// contiguous unit subsequence of `haystack`.
fn contains_units(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty()
        && haystack
            .windows(needle.len())
            .any(|window| window == needle)
}

/// Replaces every occurrence of `needle` in the unit sequence with `sub`.
fn replace_units(haystack: &[&str], needle: &[&str], sub: &str) -> String {
    let mut out = String::new();
    let mut pos = 0;
    while pos < haystack.len() {
        if pos + needle.len() <= haystack.len() && &haystack[pos..pos + needle.len()] == needle {
            out.push_str(sub);
            pos += needle.len();
        } else {
            out.push_str(haystack[pos]);
            pos += 1;
        }
    }
    out
}

/// Expands placeholder units in `template` against their paired
/// dictionaries.
///
/// A placeholder appearing in a key enumerates that dictionary's entries:
/// the key side substitutes each entry key and the value side that entry's
/// values. A placeholder appearing only in values enumerates all values of
/// its dictionary. Entries without any placeholder pass through unchanged.
pub fn expand(template: &Dictionary, placeholders: &[(String, Dictionary)]) -> Table {
    let sources: Vec<(Vec<&str>, Vec<(String, Vec<String>)>)> = placeholders
        .iter()
        .map(|(ph, dict)| (segment(ph), dict.entries()))
        .collect();

    let mut out = Table::new();
    for (tkey, tvalues) in template.entries() {
        let key_units = segment(&tkey);
        let in_key: Vec<usize> = (0..sources.len())
            .filter(|&i| contains_units(&key_units, &sources[i].0))
            .collect();

        // cartesian product over the entries of each key placeholder
        let mut combos: Vec<Vec<usize>> = vec![Vec::new()];
        for &i in &in_key {
            let mut next = Vec::new();
            for combo in &combos {
                for entry_idx in 0..sources[i].1.len() {
                    let mut c = combo.clone();
                    c.push(entry_idx);
                    next.push(c);
                }
            }
            combos = next;
        }

        for combo in combos {
            let mut new_key = tkey.clone();
            for (slot, &i) in in_key.iter().enumerate() {
                let entry_key = &sources[i].1[combo[slot]].0;
                let key_units = segment(&new_key);
                let replaced = replace_units(&key_units, &sources[i].0, entry_key);
                new_key = replaced;
            }
            let mut new_values = Vec::new();
            for tv in &tvalues {
                expand_value(tv, &sources, &in_key, &combo, &mut new_values);
            }
            out.add(new_key, new_values, false);
        }
    }
    out
}

/// Expands one template value, substituting bound placeholders with the
/// chosen entry's values and unbound ones with every value of their
/// dictionary.
fn expand_value(
    value: &str,
    sources: &[(Vec<&str>, Vec<(String, Vec<String>)>)],
    in_key: &[usize],
    combo: &[usize],
    out: &mut Vec<String>,
) {
    let units = segment(value);
    let present: Vec<usize> = (0..sources.len())
        .filter(|&i| contains_units(&units, &sources[i].0))
        .collect();
    if present.is_empty() {
        out.push(value.to_string());
        return;
    }
    let i = present[0];
    let candidates: Vec<&String> = match in_key.iter().position(|&k| k == i) {
        Some(slot) => sources[i].1[combo[slot]].1.iter().collect(),
        None => sources[i].1.iter().flat_map(|(_, vs)| vs.iter()).collect(),
    };
    for candidate in candidates {
        let substituted = replace_units(&segment(value), &sources[i].0, candidate);
        expand_value(&substituted, sources, in_key, combo, out);
    }
}

/// Removes entries or values of `base` per the removal dictionaries, then
/// applies the value regexes. Entries left without values are dropped.
pub fn filter(
    base: &Dictionary,
    removals: &[Dictionary],
    method: FilterMethod,
    include: Option<&Regex>,
    exclude: Option<&Regex>,
) -> Table {
    let mut removal_keys: Vec<(String, Vec<String>)> = Vec::new();
    for dict in removals {
        match dict {
            Dictionary::Table(t) => {
                for (k, v) in t.raw_iter() {
                    removal_keys.push((k.to_string(), v.to_vec()));
                }
            }
            Dictionary::Trie(t) => removal_keys.extend(t.entries()),
        }
    }

    let mut out = Table::new();
    for (key, values) in base.entries() {
        let removed: Vec<&Vec<String>> = removal_keys
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .collect();
        if method == FilterMethod::RemoveKeys && !removed.is_empty() {
            continue;
        }
        let kept: Vec<String> = values
            .into_iter()
            .filter(|v| {
                if method == FilterMethod::RemoveKeyValues
                    && removed.iter().any(|vs| vs.contains(v))
                {
                    return false;
                }
                if let Some(re) = include {
                    if !re.is_match(v) {
                        return false;
                    }
                }
                if let Some(re) = exclude {
                    if re.is_match(v) {
                        return false;
                    }
                }
                true
            })
            .collect();
        if !kept.is_empty() {
            out.add(key, kept, false);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Trie;

    fn table(pairs: &[(&str, &[&str])]) -> Table {
        Table::from_pairs(pairs.iter().map(|(k, v)| (*k, v.iter().copied())))
    }

    fn dict(pairs: &[(&str, &[&str])]) -> Dictionary {
        Dictionary::Table(table(pairs))
    }

    fn entries(t: &Table) -> Vec<(String, Vec<String>)> {
        t.iter()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect()
    }

    fn sorted_entries(t: &Table) -> Vec<(String, Vec<String>)> {
        let mut e = entries(t);
        e.sort();
        e
    }

    #[test]
    fn swap_inverts_and_merges_collisions() {
        let d = dict(&[("注", &["註", "注"]), ("佔", &["占"]), ("站", &["占"])]);
        let swapped = swap(&d);
        assert_eq!(
            entries(&swapped),
            vec![
                ("註".to_string(), vec!["注".to_string()]),
                ("注".to_string(), vec!["注".to_string()]),
                ("占".to_string(), vec!["佔".to_string(), "站".into()]),
            ]
        );
    }

    #[test]
    fn load_unions_in_order() {
        let merged = load([
            dict(&[("干", &["幹", "乾"])]),
            dict(&[("干", &["干"]), ("姜", &["薑"])]),
        ]);
        assert_eq!(
            entries(&merged),
            vec![
                ("干".to_string(), vec!["幹".to_string(), "乾".into(), "干".into()]),
                ("姜".to_string(), vec!["薑".to_string()]),
            ]
        );
    }

    #[test]
    fn enumerate_longest_only() {
        let d = dict(&[("钟", &["鐘", "鍾"]), ("药", &["藥", "葯"]), ("用药", &["用藥"])]);
        assert_eq!(
            apply_enum(&d, "看钟用药", false, false),
            vec!["看鐘用藥", "看鍾用藥"]
        );
    }

    #[test]
    fn enumerate_with_short_matches() {
        let d = dict(&[("钟", &["鐘", "鍾"]), ("药", &["藥", "葯"]), ("用药", &["用藥"])]);
        assert_eq!(
            apply_enum(&d, "看钟用药", true, false),
            vec!["看鐘用藥", "看鐘用葯", "看鍾用藥", "看鍾用葯"]
        );
    }

    #[test]
    fn enumerate_with_self() {
        let d = dict(&[("钟", &["鐘", "鍾"]), ("药", &["藥", "葯"]), ("用药", &["用藥"])]);
        assert_eq!(
            apply_enum(&d, "看钟用药", false, true),
            vec!["看鐘用藥", "看鐘用药", "看鍾用藥", "看鍾用药", "看钟用藥", "看钟用药"]
        );
        assert_eq!(
            apply_enum(&d, "看钟用药", true, true),
            vec![
                "看鐘用藥", "看鐘用药", "看鐘用葯", "看鍾用藥", "看鍾用药", "看鍾用葯",
                "看钟用藥", "看钟用药", "看钟用葯"
            ]
        );
    }

    #[test]
    fn enumerate_overlapping_matches() {
        let d = dict(&[("采信", &["採信"]), ("信息", &["訊息"])]);
        assert_eq!(apply_enum(&d, "采信息", false, false), vec!["採信息"]);
        assert_eq!(apply_enum(&d, "采信息", true, false), vec!["採信息", "采訊息"]);
        assert_eq!(apply_enum(&d, "采信息", false, true), vec!["採信息", "采信息"]);
        assert_eq!(
            apply_enum(&d, "采信息", true, true),
            vec!["採信息", "采信息", "采訊息"]
        );
    }

    #[test]
    fn enumerate_falls_back_to_the_input() {
        let d = dict(&[("钟", &["鐘"])]);
        assert_eq!(apply_enum(&d, "表達", false, false), vec!["表達"]);
    }

    #[test]
    fn join_rewrites_values_through_the_second_dict() {
        let joined = join(
            &dict(&[("因为", &["因爲"])]),
            &dict(&[("爲", &["為"])]),
        );
        assert_eq!(
            sorted_entries(&joined),
            vec![
                ("因为".to_string(), vec!["因為".to_string()]),
                ("爲".to_string(), vec!["為".to_string()]),
            ]
        );
    }

    #[test]
    fn join_adds_pre_images_of_second_dict_keys() {
        let joined = join(
            &dict(&[("注", &["註", "注"])]),
            &dict(&[("註冊表", &["登錄檔"])]),
        );
        assert_eq!(
            sorted_entries(&joined),
            vec![
                ("注".to_string(), vec!["註".to_string(), "注".into()]),
                ("注冊表".to_string(), vec!["登錄檔".to_string()]),
                ("註冊表".to_string(), vec!["登錄檔".to_string()]),
            ]
        );

        // when the first dict prefers the unchanged spelling, the pre-image
        // keeps itself as the leading value
        let joined = join(
            &dict(&[("注", &["注", "註"])]),
            &dict(&[("註冊表", &["登錄檔"])]),
        );
        assert_eq!(
            sorted_entries(&joined),
            vec![
                ("注".to_string(), vec!["注".to_string(), "註".into()]),
                ("注冊表".to_string(), vec!["注冊表".to_string(), "登錄檔".into()]),
                ("註冊表".to_string(), vec!["登錄檔".to_string()]),
            ]
        );
    }

    #[test]
    fn join_pre_images_cover_partial_conversions() {
        let joined = join(
            &dict(&[("注", &["注", "註"]), ("册", &["冊"]), ("注册", &["註冊"])]),
            &dict(&[("註冊表", &["登錄檔"])]),
        );
        assert_eq!(
            sorted_entries(&joined),
            vec![
                ("册".to_string(), vec!["冊".to_string()]),
                ("注".to_string(), vec!["注".to_string(), "註".into()]),
                ("注冊表".to_string(), vec!["注冊表".to_string(), "登錄檔".into()]),
                ("注册".to_string(), vec!["註冊".to_string()]),
                ("注册表".to_string(), vec!["登錄檔".to_string()]),
                ("註冊表".to_string(), vec!["登錄檔".to_string()]),
                ("註册表".to_string(), vec!["登錄檔".to_string()]),
            ]
        );
    }

    #[test]
    fn join_identity_value_is_the_pre_image_itself() {
        let joined = join(
            &dict(&[("妳", &["你", "奶"])]),
            &dict(&[("奶媽", &["奶娘"])]),
        );
        assert_eq!(
            sorted_entries(&joined),
            vec![
                ("奶媽".to_string(), vec!["奶娘".to_string()]),
                ("妳".to_string(), vec!["你".to_string(), "奶".into()]),
                ("妳媽".to_string(), vec!["妳媽".to_string(), "奶娘".into()]),
            ]
        );
    }

    #[test]
    fn join_multi_unit_keys() {
        let joined = join(
            &dict(&[("汇", &["匯", "彙"]), ("编", &["編"]), ("汇编", &["彙編"])]),
            &dict(&[("彙編", &["組譯"])]),
        );
        assert_eq!(
            sorted_entries(&joined),
            vec![
                ("彙編".to_string(), vec!["組譯".to_string()]),
                ("彙编".to_string(), vec!["組譯".to_string()]),
                ("汇".to_string(), vec!["匯".to_string(), "彙".into()]),
                ("汇編".to_string(), vec!["汇編".to_string(), "組譯".into()]),
                ("汇编".to_string(), vec!["組譯".to_string()]),
                ("编".to_string(), vec!["編".to_string()]),
            ]
        );
    }

    #[test]
    fn join_existing_entries_suppress_the_identity() {
        let joined = join(
            &dict(&[("干", &["幹", "乾", "干"]), ("白干", &["白幹", "白干"])]),
            &dict(&[("白干", &["白干酒"]), ("白幹", &["白做"]), ("白乾", &["白乾杯"])]),
        );
        assert_eq!(
            joined.get("白干").unwrap(),
            &["白做".to_string(), "白干酒".into(), "白乾杯".into()]
        );
        assert_eq!(joined.get("干").unwrap(), &["幹".to_string(), "乾".into(), "干".into()]);
    }

    #[test]
    fn join_chains_conversions_end_to_end() {
        let joined = join(
            &dict(&[("则", &["則"]), ("达", &["達"]), ("规", &["規"])]),
            &dict(&[("正則表達式", &["正規表示式"]), ("表達式", &["表示式"])]),
        );
        assert_eq!(
            sorted_entries(&joined),
            vec![
                ("则".to_string(), vec!["則".to_string()]),
                ("正则表达式".to_string(), vec!["正規表示式".to_string()]),
                ("正则表達式".to_string(), vec!["正規表示式".to_string()]),
                ("正則表达式".to_string(), vec!["正規表示式".to_string()]),
                ("正則表達式".to_string(), vec!["正規表示式".to_string()]),
                ("表达式".to_string(), vec!["表示式".to_string()]),
                ("表達式".to_string(), vec!["表示式".to_string()]),
                ("规".to_string(), vec!["規".to_string()]),
                ("达".to_string(), vec!["達".to_string()]),
            ]
        );
    }

    #[test]
    fn join_works_over_tries() {
        let trie = Trie::from_pairs([("妳", vec!["你", "奶"])]);
        let joined = join(
            &Dictionary::Trie(trie),
            &dict(&[("奶媽", &["奶娘"])]),
        );
        assert_eq!(
            joined.get("妳媽").unwrap(),
            &["妳媽".to_string(), "奶娘".into()]
        );
    }

    #[test]
    fn expand_pairs_placeholders_positionally() {
        let expanded = expand(
            &dict(&[("%n里%s", &["%n里%s"])]),
            &[
                ("%n".to_string(), dict(&[("１", &["１"]), ("２", &["２"])])),
                (
                    "%s".to_string(),
                    dict(&[("壹", &["壹"]), ("貳", &["贰"]), ("叄", &["叁"])]),
                ),
            ],
        );
        assert_eq!(
            entries(&expanded),
            vec![
                ("１里壹".to_string(), vec!["１里壹".to_string()]),
                ("１里貳".to_string(), vec!["１里贰".to_string()]),
                ("１里叄".to_string(), vec!["１里叁".to_string()]),
                ("２里壹".to_string(), vec!["２里壹".to_string()]),
                ("２里貳".to_string(), vec!["２里贰".to_string()]),
                ("２里叄".to_string(), vec!["２里叁".to_string()]),
            ]
        );
    }

    #[test]
    fn expand_ignores_absent_placeholders() {
        let expanded = expand(
            &dict(&[("%s里", &["%s里"])]),
            &[
                ("%n".to_string(), dict(&[("１", &["１"]), ("２", &["２"])])),
                (
                    "%s".to_string(),
                    dict(&[("壹", &["壹"]), ("貳", &["贰"]), ("叄", &["叁"])]),
                ),
            ],
        );
        assert_eq!(
            entries(&expanded),
            vec![
                ("壹里".to_string(), vec!["壹里".to_string()]),
                ("貳里".to_string(), vec!["贰里".to_string()]),
                ("叄里".to_string(), vec!["叁里".to_string()]),
            ]
        );
    }

    #[test]
    fn expand_passes_through_without_placeholders() {
        let expanded = expand(
            &dict(&[("里", &["裏", "里"])]),
            &[("%n".to_string(), dict(&[("１", &["１"])]))],
        );
        assert_eq!(
            entries(&expanded),
            vec![("里".to_string(), vec!["裏".to_string(), "里".into()])]
        );
    }

    #[test]
    fn expand_repeated_placeholder_uses_one_entry() {
        let expanded = expand(
            &dict(&[("%n里%n", &["%n里%n"])]),
            &[("%n".to_string(), dict(&[("１", &["１"]), ("２", &["２"])]))],
        );
        assert_eq!(
            entries(&expanded),
            vec![
                ("１里１".to_string(), vec!["１里１".to_string()]),
                ("２里２".to_string(), vec!["２里２".to_string()]),
            ]
        );
    }

    #[test]
    fn expand_value_only_placeholder_spans_all_entries() {
        let expanded = expand(
            &dict(&[("Ｎ里", &["%n里"])]),
            &[("%n".to_string(), dict(&[("１", &["１"]), ("２", &["２"])]))],
        );
        assert_eq!(
            entries(&expanded),
            vec![("Ｎ里".to_string(), vec!["１里".to_string(), "２里".into()])]
        );
    }

    #[test]
    fn expand_multi_value_entries_multiply() {
        let expanded = expand(
            &dict(&[("%n周", &["%n周", "%n週"])]),
            &[(
                "%n".to_string(),
                dict(&[("１", &["一", "壹"]), ("２", &["二", "贰"])]),
            )],
        );
        assert_eq!(
            entries(&expanded),
            vec![
                (
                    "１周".to_string(),
                    vec!["一周".to_string(), "壹周".into(), "一週".into(), "壹週".into()]
                ),
                (
                    "２周".to_string(),
                    vec!["二周".to_string(), "贰周".into(), "二週".into(), "贰週".into()]
                ),
            ]
        );
    }

    #[test]
    fn expand_placeholder_matches_whole_units_only() {
        // the composite unit ⿱艹⿰虫单 does not contain the unit ⿰虫单
        let expanded = expand(
            &dict(&[("⿰虫单", &["蟬"]), ("⿱艹⿰虫单", &["⿱艹蟬"])]),
            &[(
                "⿰虫单".to_string(),
                dict(&[("１", &["１"]), ("２", &["２"])]),
            )],
        );
        assert_eq!(
            entries(&expanded),
            vec![
                ("１".to_string(), vec!["蟬".to_string()]),
                ("２".to_string(), vec!["蟬".to_string()]),
                ("⿱艹⿰虫单".to_string(), vec!["⿱艹蟬".to_string()]),
            ]
        );
    }

    #[test]
    fn filter_include_keeps_matching_values() {
        let filtered = filter(
            &dict(&[
                ("㑮陣", &["𫝈阵"]),
                ("陣", &["阵"]),
                ("㑮", &["𫝈"]),
                ("噹", &["当", "𰁸"]),
            ]),
            &[],
            FilterMethod::RemoveKeys,
            Some(&Regex::new(r"^[\u{0}-\u{FFFF}]*$").unwrap()),
            None,
        );
        assert_eq!(
            entries(&filtered),
            vec![
                ("陣".to_string(), vec!["阵".to_string()]),
                ("噹".to_string(), vec!["当".to_string()]),
            ]
        );
    }

    #[test]
    fn filter_exclude_drops_matching_values() {
        let filtered = filter(
            &dict(&[("陣", &["阵"]), ("噹", &["当", "𰁸"])]),
            &[],
            FilterMethod::RemoveKeys,
            Some(&Regex::new(r"^[\u{0}-\u{FFFF}]*$").unwrap()),
            Some(&Regex::new("当").unwrap()),
        );
        assert_eq!(entries(&filtered), vec![("陣".to_string(), vec!["阵".to_string()])]);
    }

    #[test]
    fn filter_remove_keys_sees_raw_entries() {
        let mut removal = table(&[("干", &["幹", "乾"]), ("单", &["单"])]);
        removal.add("于", [""], false);
        let filtered = filter(
            &dict(&[
                ("干", &["幹", "乾", "干", "榦", "𠏉"]),
                ("于", &["於", "于"]),
                ("简", &["簡"]),
                ("单", &["單"]),
            ]),
            &[Dictionary::Table(removal)],
            FilterMethod::RemoveKeys,
            None,
            None,
        );
        assert_eq!(entries(&filtered), vec![("简".to_string(), vec!["簡".to_string()])]);
    }

    #[test]
    fn filter_remove_key_values_drops_listed_values() {
        let filtered = filter(
            &dict(&[
                ("干", &["幹", "乾", "干", "榦", "𠏉"]),
                ("于", &["於", "于"]),
                ("简", &["簡"]),
                ("单", &["單"]),
            ]),
            &[dict(&[
                ("干", &["榦", "𠏉", "桿"]),
                ("于", &["于"]),
                ("单", &["單"]),
                ("门", &["門"]),
            ])],
            FilterMethod::RemoveKeyValues,
            None,
            None,
        );
        assert_eq!(
            entries(&filtered),
            vec![
                ("干".to_string(), vec!["幹".to_string(), "乾".into(), "干".into()]),
                ("于".to_string(), vec!["於".to_string()]),
                ("简".to_string(), vec!["簡".to_string()]),
            ]
        );
    }
}
