//! 空白区切りレコードのフィールド読み取り
//!
//! インデックスファイル、データファイル、センスインデックスはいずれも空白区切りの
//! 行指向フォーマットです。このモジュールは、ファイル名と行番号を保持したまま
//! フィールドを順に取り出し、不正な値をその位置付きのエラーに変換します。

use std::io::Read;
use std::iter::Enumerate;
use std::str::{FromStr, Lines, SplitWhitespace};

use crate::errors::{Result, WordNetError};

/// 1レコード分のフィールドを先頭から順に読み取るカーソル
pub(crate) struct Fields<'a> {
    name: &'static str,
    line_no: usize,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    /// 新しいカーソルを作成します。
    ///
    /// # 引数
    ///
    /// * `name` - ファイル名(エラーメッセージに使用)
    /// * `line_no` - 1始まりの行番号
    /// * `record` - レコード本体
    pub fn new(name: &'static str, line_no: usize, record: &'a str) -> Self {
        Self {
            name,
            line_no,
            tokens: record.split_whitespace(),
        }
    }

    /// この位置のフォーマットエラーを生成します。
    pub fn error<S>(&self, msg: S) -> WordNetError
    where
        S: Into<String>,
    {
        WordNetError::invalid_format(self.name, self.line_no, msg)
    }

    /// 次のフィールドを文字列として取得します。
    pub fn next_str(&mut self, what: &str) -> Result<&'a str> {
        self.tokens
            .next()
            .ok_or_else(|| self.error(format!("missing field: {what}")))
    }

    /// 次のフィールドを10進数として取得します。
    pub fn next_dec<T>(&mut self, what: &str) -> Result<T>
    where
        T: FromStr,
    {
        let token = self.next_str(what)?;
        token
            .parse()
            .map_err(|_| self.error(format!("{what} must be a decimal number, {token:?}")))
    }

    /// 次のフィールドを16進数として取得します。
    pub fn next_hex<T>(&mut self, what: &str) -> Result<T>
    where
        T: TryFrom<u32>,
    {
        let token = self.next_str(what)?;
        u32::from_str_radix(token, 16)
            .ok()
            .and_then(|v| T::try_from(v).ok())
            .ok_or_else(|| self.error(format!("{what} must be a hexadecimal number, {token:?}")))
    }

    /// 残りのフィールド数を返します。
    pub fn remaining(&self) -> usize {
        self.tokens.clone().count()
    }

    /// すべてのフィールドが消費されたことを確認します。
    pub fn finish(mut self) -> Result<()> {
        match self.tokens.next() {
            None => Ok(()),
            Some(token) => Err(self.error(format!("unexpected trailing field {token:?}"))),
        }
    }
}

/// リーダーの内容をすべて読み込みます。
///
/// 読み込みに失敗した場合は、`name`を含む[`WordNetError::Io`]を返します。
/// UTF-8として不正なバイト列は置換文字に変換されます。
pub(crate) fn read_text<R>(mut rdr: R, name: &'static str) -> Result<String>
where
    R: Read,
{
    let mut buf = vec![];
    rdr.read_to_end(&mut buf)
        .map_err(|e| WordNetError::io(name, e))?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// レコード行を行番号付きで順に返すイテレータ
///
/// 空行は読み飛ばします。WordNetのデータファイルとインデックスファイルは、
/// 空白で始まる著作権表示の行から始まります。ヘッダを許す場合は、最初のレコードより
/// 前にある空白で始まる行だけを読み飛ばし、それ以降の空白で始まる行はフォーマットエラーになります。
pub(crate) struct Records<'a> {
    name: &'static str,
    lines: Enumerate<Lines<'a>>,
    in_header: bool,
}

impl<'a> Records<'a> {
    /// 新しいイテレータを作成します。
    ///
    /// # 引数
    ///
    /// * `name` - ファイル名(エラーメッセージに使用)
    /// * `text` - ファイルの内容
    /// * `header` - 先頭の著作権表示を読み飛ばすかどうか
    pub fn new(name: &'static str, text: &'a str, header: bool) -> Self {
        Self {
            name,
            lines: text.lines().enumerate(),
            in_header: header,
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<(usize, &'a str)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (i, line) = self.lines.next()?;
            let line_no = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with(' ') {
                if self.in_header {
                    continue;
                }
                return Some(Err(WordNetError::invalid_format(
                    self.name,
                    line_no,
                    "record must not start with a space",
                )));
            }
            self.in_header = false;
            return Some(Ok((line_no, line)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields() {
        let mut fields = Fields::new("data.noun", 3, "02084071 05 n 03 dog 0");
        assert_eq!(fields.next_dec::<u32>("offset").unwrap(), 2084071);
        assert_eq!(fields.next_dec::<u8>("lex_filenum").unwrap(), 5);
        assert_eq!(fields.next_str("ss_type").unwrap(), "n");
        assert_eq!(fields.next_hex::<u8>("w_cnt").unwrap(), 3);
        assert_eq!(fields.remaining(), 2);
        assert_eq!(fields.next_str("word").unwrap(), "dog");
        assert_eq!(fields.next_hex::<u8>("lex_id").unwrap(), 0);
        fields.finish().unwrap();
    }

    #[test]
    fn test_fields_errors() {
        let mut fields = Fields::new("index.noun", 7, "dog x 1a");
        assert_eq!(fields.next_str("lemma").unwrap(), "dog");
        let err = fields.next_dec::<u32>("synset_cnt").unwrap_err();
        assert!(matches!(
            err,
            WordNetError::InvalidFormat(ref e) if e.file() == "index.noun" && e.line() == 7
        ));
        assert_eq!(fields.next_hex::<u8>("w_cnt").unwrap(), 0x1a);
        assert!(fields.next_str("missing").is_err());

        let mut fields = Fields::new("index.noun", 1, "1ff");
        assert!(fields.next_hex::<u8>("w_cnt").is_err());

        let fields = Fields::new("index.noun", 1, "extra");
        assert!(fields.finish().is_err());
    }

    #[test]
    fn test_records_skip_header() {
        let text = "  1 This software and database is being provided\n  2 \n\ndog n 1 0 1 0 02084071\n\ncat n 1 0 1 0 02121620\n";
        let records = Records::new("index.noun", text, true)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            records,
            vec![(4, "dog n 1 0 1 0 02084071"), (6, "cat n 1 0 1 0 02121620")]
        );
    }

    #[test]
    fn test_records_space_after_header() {
        let text = "  1 header\ndog n 1 0 1 0 02084071\n cat n 1 0 1 0 02121620\n";
        let mut records = Records::new("index.noun", text, true);
        assert_eq!(records.next().unwrap().unwrap(), (2, "dog n 1 0 1 0 02084071"));
        assert!(matches!(
            records.next(),
            Some(Err(WordNetError::InvalidFormat(ref e))) if e.file() == "index.noun" && e.line() == 3
        ));
    }

    #[test]
    fn test_records_without_header() {
        let mut records = Records::new("index.sense", " dog%1:05:00:: 02084071 1 42\n", false);
        assert!(matches!(
            records.next(),
            Some(Err(WordNetError::InvalidFormat(ref e))) if e.line() == 1
        ));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device unavailable"))
        }
    }

    #[test]
    fn test_read_text_names_file() {
        match read_text(FailingReader, "data.verb") {
            Err(WordNetError::Io { path, .. }) => assert_eq!(path, std::path::Path::new("data.verb")),
            _ => panic!("expected an I/O error naming the file"),
        }
        assert_eq!(read_text(&b"dog\xff"[..], "index.noun").unwrap(), "dog\u{fffd}");
    }
}
