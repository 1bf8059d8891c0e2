// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Conversion of MIB labels into metric and label names.
//!
//! Names produced by this module contain only ASCII letters, digits and
//! underscores. Every other character is replaced one-for-one, so the
//! output depends on the original label alone and keeps its length in
//! characters.

/// Replaces every character outside `[A-Za-z0-9_]` with an underscore.
///
/// # Examples
///
/// ```
/// use snmpgen::sanitize_label_name;
///
/// assert_eq!(sanitize_label_name("digital-sen1-1"), "digital_sen1_1");
/// assert_eq!(sanitize_label_name("ifHCInOctets"), "ifHCInOctets");
/// ```
pub fn sanitize_label_name(label: &str,) -> String
{
    let mut name = String::with_capacity(label.len(),);
    for candidate in label.chars() {
        match candidate {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '_' => name.push(candidate,),
            _ => name.push('_',),
        }
    }
    name
}
